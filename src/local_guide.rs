pub mod model;

use self::model::LocalGuide;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::{error, info, instrument};

impl LocalGuide {
    pub fn from_json(json: &str) -> Result<Self, LocalGuideError> {
        serde_json::from_str(json).map_err(|err| {
            error!("Local guide parse failed: {:?}", err);
            LocalGuideError::InvalidJson(err)
        })
    }

    #[instrument]
    pub fn load(path: &Path) -> Result<Self, LocalGuideError> {
        let json = std::fs::read_to_string(path).map_err(LocalGuideError::Io)?;
        let guide = Self::from_json(&json)?;

        let count: usize = guide.sections().map(|(_, places)| places.len()).sum();

        info!("Loaded {} local recommendations from {}", count, path.display());

        Ok(guide)
    }
}

#[derive(Debug)]
pub enum LocalGuideError {
    Io(std::io::Error),
    InvalidJson(serde_json::Error),
}

impl Display for LocalGuideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalGuideError::Io(err) => write!(f, "Failed to read local guide: {}", err),
            LocalGuideError::InvalidJson(err) => write!(f, "Invalid local guide: {}", err),
        }
    }
}

impl std::error::Error for LocalGuideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocalGuideError::Io(err) => Some(err),
            LocalGuideError::InvalidJson(err) => Some(err),
        }
    }
}
