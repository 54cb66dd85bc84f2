use crate::persistence::BlobStore;
use crate::{Engine, MemoryStore, RootNode, Session, TesseraError};
use serde_json::json;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmWorkbench {
    engine: Engine,
    session: Session<MemoryStore>,
}

#[wasm_bindgen]
impl WasmWorkbench {
    #[wasm_bindgen(constructor)]
    pub fn new(catalogue_json: &str) -> Result<WasmWorkbench, JsValue> {
        console_error_panic_hook::set_once();

        let engine =
            Engine::from_json(catalogue_json).map_err(|e| JsValue::from_str(&format_error(&e)))?;
        Ok(WasmWorkbench {
            engine,
            session: Session::new(MemoryStore::new()),
        })
    }

    #[wasm_bindgen(js_name = blockDefinitions)]
    pub fn block_definitions(&self) -> String {
        self.engine.block_definitions_json().to_string()
    }

    #[wasm_bindgen(js_name = toolbox)]
    pub fn toolbox(&self) -> String {
        self.engine.toolbox_json().to_string()
    }

    /// Replace the session tree with the editor's current tree (JSON)
    #[wasm_bindgen(js_name = setTree)]
    pub fn set_tree(&mut self, tree_json: &str) -> String {
        match serde_json::from_str::<RootNode>(tree_json) {
            Ok(tree) => {
                self.session.replace_tree(tree);
                success(json!({}))
            }
            Err(e) => failure(&format!("Invalid tree JSON: {}", e)),
        }
    }

    #[wasm_bindgen(js_name = tree)]
    pub fn tree(&self) -> String {
        success(json!({ "tree": self.session.tree() }))
    }

    #[wasm_bindgen(js_name = compile)]
    pub fn compile(&self) -> String {
        match self.session.compile(&self.engine) {
            Ok(program) => success(json!({ "program": program })),
            Err(e) => failure(&format_error(&e)),
        }
    }

    #[wasm_bindgen(js_name = save)]
    pub fn save(&mut self) -> String {
        match self.session.save() {
            Ok(()) => success(json!({})),
            Err(e) => failure(&format_error(&e)),
        }
    }

    #[wasm_bindgen(js_name = load)]
    pub fn load(&mut self) -> String {
        match self.session.load(&self.engine) {
            Ok(restored) => success(json!({ "restored": restored, "tree": self.session.tree() })),
            Err(e) => failure(&format_error(&e)),
        }
    }

    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) -> String {
        match self.session.clear() {
            Ok(()) => success(json!({})),
            Err(e) => failure(&format_error(&e)),
        }
    }

    /// The raw stored blob, for hosts that keep it in their own storage.
    /// `blob` is null when nothing has been saved.
    #[wasm_bindgen(js_name = storedBlob)]
    pub fn stored_blob(&self) -> String {
        match self.session.store().get(self.session.key()) {
            Ok(blob) => success(json!({ "blob": blob })),
            Err(e) => failure(&format_error(&e)),
        }
    }

    /// Hand back a blob previously taken from `storedBlob` and load it
    #[wasm_bindgen(js_name = restoreBlob)]
    pub fn restore_blob(&mut self, blob: &str) -> String {
        let key = self.session.key().to_string();
        if let Err(e) = self.session.store_mut().set(&key, blob) {
            return failure(&format_error(&e));
        }
        self.load()
    }
}

fn success(mut payload: serde_json::Value) -> String {
    if let serde_json::Value::Object(map) = &mut payload {
        map.insert("success".to_string(), json!(true));
        map.insert("error".to_string(), serde_json::Value::Null);
    }
    payload.to_string()
}

fn failure(message: &str) -> String {
    json!({ "success": false, "error": message }).to_string()
}

fn format_error(error: &TesseraError) -> String {
    match error {
        TesseraError::Parse(details) => format!(
            "Parse Error: {} at {}:{}",
            details.message, details.span.line, details.span.col
        ),
        TesseraError::MissingGoal => "Compile Error: add a goal block".to_string(),
        other => other.to_string(),
    }
}
