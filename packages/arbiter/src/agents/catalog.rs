//! Built-in model roster for the OpenRouter provider.
//!
//! The roster is a static table so callers (CLI flags, front ends) can
//! enumerate what is on offer without constructing anything.

use serde::{Deserialize, Serialize};

use crate::domain::Side;

/// One selectable provider model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    /// Identifier sent to the provider.
    pub id: &'static str,
    /// Human-readable name for menus and logs.
    pub display_name: &'static str,
}

static MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "mistralai/devstral-small:free",
        display_name: "Mistral Devstral Small",
    },
    ModelInfo {
        id: "deepseek/deepseek-prover-v2:free",
        display_name: "Deepseek Prover v2",
    },
    ModelInfo {
        id: "meta-llama/llama-3.3-8b-instruct:free",
        display_name: "Llama 3.3 8B",
    },
];

/// Model picked for White when nothing else is configured.
pub const DEFAULT_WHITE_MODEL: &str = "meta-llama/llama-3.3-8b-instruct:free";
/// Model picked for Black when nothing else is configured.
pub const DEFAULT_BLACK_MODEL: &str = "mistralai/devstral-small:free";

/// All models the provider agent knows about.
pub fn available_models() -> &'static [ModelInfo] {
    MODELS
}

/// Look up a roster entry by its provider identifier.
pub fn model_by_id(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|model| model.id == id)
}

/// Per-side agent selection: which model plays and under what name it
/// appears in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Provider model identifier.
    pub model: String,
    /// Display name used in logs and summaries.
    pub name: String,
}

impl AgentProfile {
    pub fn new(model: impl Into<String>, name: impl Into<String>) -> AgentProfile {
        AgentProfile {
            model: model.into(),
            name: name.into(),
        }
    }

    /// The stock profile for a side.
    pub fn default_for(side: Side) -> AgentProfile {
        match side {
            Side::White => AgentProfile::new(DEFAULT_WHITE_MODEL, "White AI"),
            Side::Black => AgentProfile::new(DEFAULT_BLACK_MODEL, "Black AI"),
        }
    }
}
