use crate::ButtonLinkConfig;

/// The slice of a DOM element the click handler needs.
/// Implemented by the in-memory [`crate::tree::Document`] elements and by the browser binding.
pub trait DomElement: Sized {
    fn tag_name(&self) -> String;
    fn parent_element(&self) -> Option<Self>;
    fn get_attribute(&self, name: &str) -> Option<String>;
}

/// Performs the actual page navigation, e.g. by assigning `location.href`.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, url: &str) {
        self(url)
    }
}

/// Walks from `origin` (inclusive) towards the root and returns the first button element.
/// Returns `None` as soon as the boundary element (usually `<body>`) is reached
/// or the element is detached from its document.
pub fn find_button<E>(origin: E, config: &ButtonLinkConfig) -> Option<E>
where
    E: DomElement,
{
    let mut current = origin;
    loop {
        let tag_name = current.tag_name();
        if config.is_button(&tag_name) {
            return Some(current);
        }
        if config.is_boundary(&tag_name) {
            return None;
        }
        current = current.parent_element()?;
    }
}

/// The url a button navigates to. A missing attribute yields an empty target.
pub fn navigation_target<E>(button: &E, config: &ButtonLinkConfig) -> String
where
    E: DomElement,
{
    button
        .get_attribute(config.href_attribute())
        .unwrap_or_default()
}

/// Handles a click that originated on `origin`.
/// Returns the url that was passed to the navigator, if any.
pub fn handle_click<E, N>(origin: E, config: &ButtonLinkConfig, navigator: &N) -> Option<String>
where
    E: DomElement,
    N: Navigator + ?Sized,
{
    let Some(button) = find_button(origin, config) else {
        log::trace!(
            "click outside of any <{}>, ignoring",
            config.button_tag()
        );
        return None;
    };

    let url = navigation_target(&button, config);
    log::debug!("navigating to {:?}", url);
    navigator.navigate(&url);
    Some(url)
}
