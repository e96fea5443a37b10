use std::panic;

use button_link_client::{init_logging, start, ButtonLinkConfig};
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::console;

#[wasm_bindgen(start)]
fn main() -> Result<(), JsValue> {
    panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(error) = init_logging(LevelFilter::Info) {
        console::warn_1(&error.to_string().into());
    }

    start(ButtonLinkConfig::default())?;
    log::info!("button links ready");

    Ok(())
}
