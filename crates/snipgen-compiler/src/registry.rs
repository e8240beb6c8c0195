//! Target registry: every target by id, in canonical order.

use snipgen_codegen::{targets, Target};

pub struct TargetRegistry {
    targets: Vec<Box<dyn Target>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self {
            targets: targets::all(),
        }
    }

    /// Look a target up by id, ignoring ASCII case and surrounding blanks.
    pub fn get(&self, id: &str) -> Option<&dyn Target> {
        let id = id.trim();
        self.targets
            .iter()
            .find(|t| t.id().eq_ignore_ascii_case(id))
            .map(|t| t.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.targets.iter().map(|t| t.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Target> + '_ {
        self.targets.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
