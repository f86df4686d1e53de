//! Block metadata declarations.
//!
//! These types serialize to the shape the host's extension manager reads
//! from `getInfo()`, so field names follow the host's camelCase keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata describing an extension and its blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    /// Stable extension id.
    pub id: String,
    /// Display name in the block palette.
    pub name: String,
    /// Icon shown on each block, as a data URI.
    #[serde(rename = "blockIconURI")]
    pub block_icon_uri: Option<String>,
    /// Icon shown in the category menu, as a data URI.
    #[serde(rename = "menuIconURI")]
    pub menu_icon_uri: Option<String>,
    /// Primary block color.
    pub color1: String,
    /// Secondary block color.
    pub color2: String,
    /// Declared blocks, in palette order.
    pub blocks: Vec<BlockInfo>,
}

impl ExtensionInfo {
    /// Look up a block by opcode.
    pub fn block(&self, opcode: &str) -> Option<&BlockInfo> {
        self.blocks.iter().find(|b| b.opcode == opcode)
    }
}

/// Kind of block shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Stack block with no return value.
    Command,
    /// Round block returning a value.
    Reporter,
    /// Hexagonal block returning a boolean.
    Boolean,
}

/// A single block declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    /// Method name the host dispatches to.
    pub opcode: String,
    /// Block shape.
    pub block_type: BlockType,
    /// Label with `[arg]` placeholders.
    pub text: String,
    /// Argument declarations keyed by placeholder name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, ArgumentInfo>,
}

impl BlockInfo {
    /// A command block with no arguments.
    pub fn command(opcode: &str, text: &str) -> Self {
        Self {
            opcode: opcode.to_string(),
            block_type: BlockType::Command,
            text: text.to_string(),
            arguments: BTreeMap::new(),
        }
    }

    /// A reporter block with no arguments.
    pub fn reporter(opcode: &str, text: &str) -> Self {
        Self {
            block_type: BlockType::Reporter,
            ..Self::command(opcode, text)
        }
    }

    /// Add a string argument with a default value.
    pub fn with_string_arg(mut self, name: &str, default_value: &str) -> Self {
        self.arguments.insert(
            name.to_string(),
            ArgumentInfo {
                arg_type: ArgumentType::String,
                default_value: default_value.to_string(),
            },
        );
        self
    }
}

/// Argument value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Free text.
    String,
    /// Numeric input.
    Number,
}

/// A single argument declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentInfo {
    /// Value type.
    #[serde(rename = "type")]
    pub arg_type: ArgumentType,
    /// Value pre-filled in the palette.
    pub default_value: String,
}
