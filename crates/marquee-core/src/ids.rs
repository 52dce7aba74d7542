//! Identifiers for host-registered entities.

use serde::{Deserialize, Serialize};

/// Opaque handle to a DOM node the host registered in the manifest.
/// The host chooses the numbering; the engine only compares and routes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);
