use button_link_core::{handle_click, Navigator};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document, Element, Event, Node};

mod console;
mod element;
mod error;

pub use button_link_core::{ButtonLinkConfig, ButtonLinkConfigBuilder};
pub use console::{init_logging, ConsoleLogger};
pub use element::WebElement;
pub use error::BindError;

const CLICK: &str = "click";
const DOM_CONTENT_LOADED: &str = "DOMContentLoaded";
const LOADING: &str = "loading";

pub fn current_document() -> Result<Document, BindError> {
    window()
        .ok_or(BindError::NoWindow)?
        .document()
        .ok_or(BindError::NoDocument)
}

/// Bind every trigger element once the document is ready.
/// The listeners stay attached for the lifetime of the page.
pub fn start(config: ButtonLinkConfig) -> Result<(), BindError> {
    start_with(config, assign_location)
}

/// Like [`start`], but clicks are resolved to urls and handed to `navigator`.
pub fn start_with<N>(config: ButtonLinkConfig, navigator: N) -> Result<(), BindError>
where
    N: Navigator + 'static,
{
    let document = current_document()?;

    if document.ready_state() != LOADING {
        bind_with(&document, config, navigator)?.forget();
        return Ok(());
    }

    let ready: Closure<dyn FnMut()> = Closure::once(move || {
        match current_document().and_then(|document| bind_with(&document, config, navigator)) {
            Ok(links) => links.forget(),
            Err(error) => log::error!("{}", error),
        }
    });
    document
        .add_event_listener_with_callback(DOM_CONTENT_LOADED, ready.as_ref().unchecked_ref())
        .map_err(|error| BindError::listener(DOM_CONTENT_LOADED, error))?;
    ready.forget();

    Ok(())
}

/// Attach the click listener to the trigger elements currently in `document`,
/// navigating by assigning `location.href`.
pub fn bind(document: &Document, config: ButtonLinkConfig) -> Result<ButtonLinks, BindError> {
    bind_with(document, config, assign_location)
}

/// Like [`bind`], but clicks are resolved to urls and handed to `navigator`.
pub fn bind_with<N>(
    document: &Document,
    config: ButtonLinkConfig,
    navigator: N,
) -> Result<ButtonLinks, BindError>
where
    N: Navigator + 'static,
{
    let collection = document.get_elements_by_class_name(config.trigger_class());
    // HtmlCollection is live, take a snapshot
    let triggers: Vec<Element> = (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect();
    log::debug!(
        "binding {} .{} element(s)",
        triggers.len(),
        config.trigger_class()
    );

    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        on_click(&event, &config, &navigator);
    });
    let callback = listener.as_ref().unchecked_ref();

    let mut attached = Vec::with_capacity(triggers.len());
    for trigger in triggers {
        if let Err(error) = trigger.add_event_listener_with_callback(CLICK, callback) {
            detach(&attached, &listener);
            return Err(BindError::listener(CLICK, error));
        }
        attached.push(trigger);
    }

    Ok(ButtonLinks {
        triggers: attached,
        listener: Some(listener),
    })
}

fn detach(triggers: &[Element], listener: &Closure<dyn FnMut(Event)>) {
    for trigger in triggers {
        if let Err(error) =
            trigger.remove_event_listener_with_callback(CLICK, listener.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove click listener: {:?}", error);
        }
    }
}

/// The click listener. Returns the url navigated to, if any.
pub fn on_click<N>(event: &Event, config: &ButtonLinkConfig, navigator: &N) -> Option<String>
where
    N: Navigator + ?Sized,
{
    let origin = match event.target()?.dyn_into::<Element>() {
        Ok(element) => element,
        Err(target) => target.dyn_into::<Node>().ok()?.parent_element()?,
    };

    handle_click(WebElement(origin), config, navigator)
}

fn assign_location(url: &str) {
    let Some(window) = window() else {
        log::warn!("cannot navigate to {:?}: window is unavailable", url);
        return;
    };

    if let Err(error) = window.location().set_href(url) {
        log::warn!("failed to navigate to {:?}: {:?}", url, error);
    }
}

/// Click listeners attached by [`bind`]. Dropping this detaches them again.
pub struct ButtonLinks {
    triggers: Vec<Element>,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl ButtonLinks {
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Keep the listeners attached for the rest of the page's life.
    pub fn forget(mut self) {
        if let Some(listener) = self.listener.take() {
            listener.forget();
        }
    }
}

impl Drop for ButtonLinks {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            detach(&self.triggers, &listener);
        }
    }
}
