//! Spreadsheet import: file picker and an import button.
//!
//! The selected file is uploaded as is; parsing happens on the backend.

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::{Operation, PageState, ACCEPTED_FILE_TYPES};

#[component]
pub fn ImportSection(state: PageState) -> impl IntoView {
    let (selected, set_selected) = create_signal(None::<File>);

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        if let Some(file) = &file {
            log::info!("📄 Selected {} ({} bytes)", file.name(), file.size());
        }
        set_selected.set(file);
    };

    let importing = {
        let state = state.clone();
        move || state.is_busy(Operation::Import)
    };

    let label = {
        let importing = importing.clone();
        move || {
            if importing() {
                "⏳ Importing...".to_string()
            } else {
                selected
                    .get()
                    .map(|file| file.name())
                    .unwrap_or_else(|| "Choose a spreadsheet (xlsx, xls, ods, csv)".to_string())
            }
        }
    };

    let on_import = move |_| state.import(selected.get());

    view! {
        <div class="import-section">
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">{label}</div>

            <input
                type="file"
                id="fileInput"
                accept=ACCEPTED_FILE_TYPES
                style="display:none"
                on:change=on_file_change
            />
            <label for="fileInput" class="upload-button">
                "Choose file"
            </label>
            <button class="button primary" disabled=importing on:click=on_import>
                "Import"
            </button>
        </div>
    }
}
