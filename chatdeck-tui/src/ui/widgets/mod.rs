mod footer;
mod help;

pub use footer::Footer;
pub use help::HelpOverlay;
