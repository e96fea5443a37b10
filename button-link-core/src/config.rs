use derive_builder::Builder;

pub const DEFAULT_TRIGGER_CLASS: &str = "button-link";
pub const DEFAULT_BUTTON_TAG: &str = "button";
pub const DEFAULT_HREF_ATTRIBUTE: &str = "data-href";
pub const DEFAULT_BOUNDARY_TAG: &str = "body";

/// Describes the markup a page uses for its link buttons.
/// ```
/// use button_link_core::ButtonLinkConfigBuilder;
///
/// let config = ButtonLinkConfigBuilder::default()
///     .trigger_class("nav-button")
///     .build()
///     .unwrap();
/// assert_eq!(config.href_attribute(), "data-href");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ButtonLinkConfig {
    /// elements carrying this class receive the click listener
    #[builder(setter(into), default = "DEFAULT_TRIGGER_CLASS.to_string()")]
    trigger_class: String,
    /// the only tag a navigation url is read from
    #[builder(setter(into), default = "DEFAULT_BUTTON_TAG.to_string()")]
    button_tag: String,
    #[builder(setter(into), default = "DEFAULT_HREF_ATTRIBUTE.to_string()")]
    href_attribute: String,
    /// the ancestor walk gives up once it reaches this tag
    #[builder(setter(into), default = "DEFAULT_BOUNDARY_TAG.to_string()")]
    boundary_tag: String,
}

impl ButtonLinkConfig {
    pub fn trigger_class(&self) -> &str {
        &self.trigger_class
    }

    pub fn button_tag(&self) -> &str {
        &self.button_tag
    }

    pub fn href_attribute(&self) -> &str {
        &self.href_attribute
    }

    pub fn boundary_tag(&self) -> &str {
        &self.boundary_tag
    }

    pub fn is_button(&self, tag_name: &str) -> bool {
        tag_name.eq_ignore_ascii_case(&self.button_tag)
    }

    pub fn is_boundary(&self, tag_name: &str) -> bool {
        tag_name.eq_ignore_ascii_case(&self.boundary_tag)
    }
}

impl Default for ButtonLinkConfig {
    fn default() -> Self {
        Self {
            trigger_class: DEFAULT_TRIGGER_CLASS.to_string(),
            button_tag: DEFAULT_BUTTON_TAG.to_string(),
            href_attribute: DEFAULT_HREF_ATTRIBUTE.to_string(),
            boundary_tag: DEFAULT_BOUNDARY_TAG.to_string(),
        }
    }
}

impl ButtonLinkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("trigger_class", &self.trigger_class),
            ("button_tag", &self.button_tag),
            ("href_attribute", &self.href_attribute),
            ("boundary_tag", &self.boundary_tag),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(format!("{} must not be empty", name));
                }
                if value.contains(char::is_whitespace) {
                    return Err(format!("{} must not contain whitespace", name));
                }
            }
        }

        Ok(())
    }
}
