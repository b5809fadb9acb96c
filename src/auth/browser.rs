/// Something that can show the consent page to the user.
pub trait Browser {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// The platform's default browser.
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}
