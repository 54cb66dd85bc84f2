use crate::schema::{self, BlockSchema, Palette};
use crate::{
    assemble, parse_program_with, Catalogue, RawSignature, Registry, ResourceLimits, RootNode,
    TesseraResult,
};
use serde_json::Value as Json;
use tracing::debug;

/// The Tessera engine.
///
/// Built once from a signature catalogue; afterwards the schemas, palette
/// and emitter registry never change.
#[derive(Debug, Clone)]
pub struct Engine {
    catalogue: Catalogue,
    schemas: Vec<BlockSchema>,
    palette: Palette,
    registry: Registry,
}

impl Engine {
    pub fn new(catalogue: Catalogue) -> Self {
        let schemas: Vec<BlockSchema> = catalogue.iter().map(schema::derive).collect();
        let palette = Palette::classify(&schemas);
        let registry = Registry::from_catalogue(&catalogue);

        debug!(
            facts = palette.facts.len(),
            goals = palette.goals.len(),
            "block schemas derived"
        );

        Self {
            catalogue,
            schemas,
            palette,
            registry,
        }
    }

    /// Load the library parser's output
    pub fn load(raw: Vec<RawSignature>) -> TesseraResult<Self> {
        Ok(Self::new(Catalogue::load(raw)?))
    }

    pub fn from_json(json: &str) -> TesseraResult<Self> {
        Self::from_json_with_limits(json, &ResourceLimits::default())
    }

    pub fn from_json_with_limits(json: &str, limits: &ResourceLimits) -> TesseraResult<Self> {
        Ok(Self::new(Catalogue::from_json(json, limits)?))
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Schemas in catalogue order
    pub fn schemas(&self) -> &[BlockSchema] {
        &self.schemas
    }

    pub fn schema(&self, name: &str) -> Option<&BlockSchema> {
        self.schemas.iter().find(|s| s.type_id == name)
    }

    /// Compile a tree into program text
    pub fn compile(&self, tree: &RootNode) -> TesseraResult<String> {
        assemble(tree, &self.registry)
    }

    /// Parse program text back into a tree bound against this catalogue
    pub fn decompile(&self, program: &str, source_id: Option<String>) -> TesseraResult<RootNode> {
        parse_program_with(program, source_id, &self.catalogue)
    }

    /// Every block definition the editor needs, root block first
    pub fn block_definitions_json(&self) -> Json {
        let mut blocks = vec![schema::root_block_json()];
        blocks.extend(self.schemas.iter().map(BlockSchema::to_block_json));
        Json::Array(blocks)
    }

    pub fn toolbox_json(&self) -> Json {
        self.palette.to_toolbox_json()
    }
}
