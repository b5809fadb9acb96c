//! OAuth client setup and consent page URL.

use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{
    AuthType, AuthUrl, ClientId, ClientSecret as OAuthClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenUrl,
};

use super::scope;
use crate::client_secret::ClientSecret;
use crate::error::{ConfigError, Result};

/// What the consent step hands to the rest of the flow.
pub struct ConsentRequest {
    pub url: Url,
    pub state: CsrfToken,
    pub pkce_verifier: PkceCodeVerifier,
}

/// Build the OAuth client for a client-secret file and a loopback redirect.
///
/// The secret travels in the form body, as Google's installed-app samples
/// send it.
pub fn oauth_client(secret: &ClientSecret, redirect_uri: &str) -> Result<BasicClient> {
    let auth_url = AuthUrl::new(secret.auth_uri.clone())
        .map_err(invalid_url("auth_uri", &secret.auth_uri))?;
    let token_url = TokenUrl::new(secret.token_uri.clone())
        .map_err(invalid_url("token_uri", &secret.token_uri))?;
    let redirect_url = RedirectUrl::new(redirect_uri.to_string())
        .map_err(invalid_url("redirect_uri", redirect_uri))?;

    let client_secret = Some(secret.client_secret.clone())
        .filter(|s| !s.is_empty())
        .map(OAuthClientSecret::new);

    Ok(BasicClient::new(
        ClientId::new(secret.client_id.clone()),
        client_secret,
        auth_url,
        Some(token_url),
    )
    .set_auth_type(AuthType::RequestBody)
    .set_redirect_uri(redirect_url))
}

fn invalid_url(field: &'static str, value: &str) -> impl FnOnce(url::ParseError) -> ConfigError {
    let value = value.to_string();
    move |err| ConfigError::InvalidUrl { field, value, err }
}

/// Build the URL the user visits to grant consent.
pub fn authorization_url(client: &BasicClient) -> ConsentRequest {
    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let (url, state) = client
        .authorize_url(CsrfToken::new_random)
        .add_scopes(scope::SCOPES.iter().map(|s| Scope::new(s.to_string())))
        .set_pkce_challenge(pkce_challenge)
        // offline + consent makes Google issue a refresh token every time,
        // not only on the first grant.
        .add_extra_param("access_type", "offline")
        .add_extra_param("prompt", "consent")
        .url();

    ConsentRequest {
        url,
        state,
        pkce_verifier,
    }
}
