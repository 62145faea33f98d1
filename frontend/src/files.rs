use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader};

/// Reads `file` as a data URL and hands the result to `on_loaded`.
pub fn read_as_data_url(
    file: &File,
    on_loaded: impl FnOnce(String) + 'static,
) -> Result<(), String> {
    let reader = FileReader::new().map_err(|e| format!("Failed to create reader: {e:?}"))?;

    // --- onloadend: fires once per read, so the closure is freed after it runs ---
    let reader_clone = reader.clone();
    let onloadend = Closure::once_into_js(move || match reader_clone.result() {
        Ok(value) => match value.as_string() {
            Some(data_url) => on_loaded(data_url),
            None => log::error!("File reader produced no text"),
        },
        Err(e) => log::error!("File read failed: {e:?}"),
    });
    reader.set_onloadend(Some(onloadend.unchecked_ref()));

    reader
        .read_as_data_url(file)
        .map_err(|e| format!("Failed to read file: {e:?}"))
}
