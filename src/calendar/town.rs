pub const OTHER_TOWN: &str = "Other";

/// Maps free-text locations onto the area names used by the town filter.
#[derive(Debug, Clone)]
pub struct TownClassifier {
    known_towns: Vec<KnownTown>,
}

#[derive(Debug, Clone)]
struct KnownTown {
    name: String,
    lowercase: String,
}

impl TownClassifier {
    /// Order matters: the first known town found in a location wins, so more specific names
    /// (e.g. "North Hampton") have to come before the names they contain ("Hampton").
    pub fn new<I, S>(known_towns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_towns: known_towns
                .into_iter()
                .map(Into::<String>::into)
                .filter(|name| !name.trim().is_empty())
                .map(|name| KnownTown {
                    lowercase: name.to_lowercase(),
                    name,
                })
                .collect(),
        }
    }

    pub fn known_towns(&self) -> impl Iterator<Item = &str> {
        self.known_towns.iter().map(|town| town.name.as_str())
    }

    pub fn classify(&self, location: Option<&str>) -> String {
        let location = match location.map(str::trim) {
            Some(location) if !location.is_empty() => location,
            _ => return OTHER_TOWN.to_string(),
        };

        let lowercase_location = location.to_lowercase();

        if let Some(town) = self
            .known_towns
            .iter()
            .find(|town| lowercase_location.contains(&town.lowercase))
        {
            return town.name.clone();
        }

        let without_escapes = location.replace('\\', "");
        let first_segment = without_escapes
            .split(',')
            .next()
            .unwrap_or_default()
            .trim();

        if first_segment.is_empty() {
            OTHER_TOWN.to_string()
        } else {
            first_segment.to_string()
        }
    }
}
