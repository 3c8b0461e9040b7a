use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("train spec '{name}' is already registered")]
    DuplicateSpec { name: String },

    #[error("registry is frozen, cannot register train spec '{name}'")]
    RegistryFrozen { name: String },

    #[error("no train spec registered under '{name}'")]
    UnknownSpec { name: String },

    #[error("unknown model flavor '{flavor}' (available: {available})")]
    UnknownFlavor { flavor: String, available: String },
}

impl SpecError {
    pub fn unknown_flavor(flavor: &str, available: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let available = available
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownFlavor {
            flavor: flavor.to_string(),
            available,
        }
    }
}
