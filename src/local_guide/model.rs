use crate::calendar::display::safe_url;
use crate::calendar::filter::TownFilter;
use crate::calendar::town::OTHER_TOWN;
use itertools::Itertools;
use reqwest::Url;
use serde::Deserialize;
use strum::IntoEnumIterator;

/// The recommendations document behind the "local" page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocalGuide {
    pub food: FoodLists,
    pub shops: Vec<Place>,
    pub activities: Vec<Place>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FoodLists {
    pub all_ages: Vec<Place>,
    #[serde(rename = "adults21")]
    pub adults_21: Vec<Place>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Place {
    pub name: String,
    pub desc: String,
    pub town: Option<String>,
    pub url: Option<String>,
}

impl Place {
    pub fn town(&self) -> &str {
        match self.town.as_deref().map(str::trim) {
            Some(town) if !town.is_empty() => town,
            _ => OTHER_TOWN,
        }
    }

    /// The place's link, if it is a usable http(s) URL.
    pub fn link(&self) -> Option<Url> {
        self.url.as_deref().and_then(safe_url)
    }
}

/// One rendered list. The serialized name is the list's element id on the page.
#[derive(strum::IntoStaticStr, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    #[strum(serialize = "local-food-all")]
    FoodAllAges,
    #[strum(serialize = "local-food-21")]
    FoodAdults21,
    #[strum(serialize = "local-shops")]
    Shops,
    #[strum(serialize = "local-activities")]
    Activities,
}

/// Accordion panel a list lives in; food has two lists.
#[derive(strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Shops,
    Activities,
}

impl Section {
    pub fn category(self) -> Category {
        match self {
            Section::FoodAllAges | Section::FoodAdults21 => Category::Food,
            Section::Shops => Category::Shops,
            Section::Activities => Category::Activities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatches<'a> {
    pub category: Category,
    pub lists: Vec<(Section, Vec<&'a Place>)>,
}

impl CategoryMatches<'_> {
    /// Whether the panel should show its "nothing here" note.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(|(_, places)| places.is_empty())
    }
}

impl LocalGuide {
    pub fn section(&self, section: Section) -> &[Place] {
        match section {
            Section::FoodAllAges => &self.food.all_ages,
            Section::FoodAdults21 => &self.food.adults_21,
            Section::Shops => &self.shops,
            Section::Activities => &self.activities,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = (Section, &[Place])> {
        Section::iter().map(move |section| (section, self.section(section)))
    }

    pub fn towns(&self) -> Vec<&str> {
        self.sections()
            .flat_map(|(_, places)| places.iter().map(Place::town))
            .unique()
            .sorted()
            .collect()
    }

    pub fn filter_by_town(&self, town: &TownFilter) -> Vec<CategoryMatches<'_>> {
        Category::iter()
            .map(|category| CategoryMatches {
                category,
                lists: self
                    .sections()
                    .filter(|(section, _)| section.category() == category)
                    .map(|(section, places)| {
                        let visible = places
                            .iter()
                            .filter(|place| town.matches(place.town()))
                            .collect();

                        (section, visible)
                    })
                    .collect(),
            })
            .collect()
    }
}
