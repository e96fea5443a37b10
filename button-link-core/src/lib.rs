//! Buttons that navigate to the url in their `data-href` attribute when they,
//! or anything inside them, are clicked.
//!
//! This crate is DOM agnostic: implement [`DomElement`] and [`Navigator`] for your environment,
//! or use `button-link-client` for the browser.

mod config;
mod handler;
pub mod tree;

pub use config::{
    ButtonLinkConfig, ButtonLinkConfigBuilder, ButtonLinkConfigBuilderError, DEFAULT_BOUNDARY_TAG,
    DEFAULT_BUTTON_TAG, DEFAULT_HREF_ATTRIBUTE, DEFAULT_TRIGGER_CLASS,
};
pub use handler::{find_button, handle_click, navigation_target, DomElement, Navigator};
