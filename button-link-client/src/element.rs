use button_link_core::DomElement;

/// A browser element seen through [`DomElement`].
#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(pub web_sys::Element);

impl DomElement for WebElement {
    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(WebElement)
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

