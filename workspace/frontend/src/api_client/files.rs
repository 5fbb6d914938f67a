//! Moving user-picked files between the DOM and [`UploadFile`].

use compute::UploadFile;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FileList, FormData, HtmlInputElement};

fn js_message(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Reads every file selected in `input` into memory, in selection order.
pub async fn read_selected(input: &HtmlInputElement) -> Result<Vec<UploadFile>, String> {
    match input.files() {
        Some(list) => read_file_list(&list).await,
        None => Ok(Vec::new()),
    }
}

pub async fn read_file_list(list: &FileList) -> Result<Vec<UploadFile>, String> {
    let mut files = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("Failed to read {}: {}", file.name(), js_message(e)))?;
        let bytes = Uint8Array::new(&buffer).to_vec();
        log::debug!("Read {} ({} bytes)", file.name(), bytes.len());
        files.push(UploadFile::new(file.name(), bytes));
    }
    Ok(files)
}

/// Names of the files currently selected in `input`.
pub fn selected_names(input: &HtmlInputElement) -> Vec<String> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|f| f.name())
        .collect()
}

/// Multipart body with every file under `field`.
pub fn form_data(field: &str, files: &[UploadFile]) -> Result<FormData, String> {
    let form = FormData::new().map_err(js_message)?;
    for file in files {
        let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(js_message)?;
        form.append_with_blob_and_filename(field, &blob, &file.name)
            .map_err(js_message)?;
    }
    Ok(form)
}
