pub mod browser;
pub mod config;
pub mod element;
pub mod error;
pub mod filler;
pub mod input;
pub mod page;

pub use browser::{ChromeSessionFactory, PortalBrowser};
pub use config::{BrowserBuilder, BrowserConfig};
pub use error::{Error, Result};
pub use filler::{
    FillOptions, FillReport, FormFiller, FormSession, MissingFieldPolicy, SessionFactory,
};
pub use input::{FieldEntry, FillPlan};
pub use page::{FormField, Page};
