use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::BinaryRef;
use crate::util::errors::WorkflowError;

/// Number of portfolio slots the gallery step offers.
pub const MAX_PORTFOLIO_ITEMS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<BinaryRef>,
    pub images: Vec<BinaryRef>,
    pub skills: BTreeSet<String>,
}

impl PortfolioItem {
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Title, description and thumbnail are all present.
    pub fn is_showcase_ready(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty() && self.thumbnail.is_some()
    }
}

/// Client rating on a testimonial, 1 to 5 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = WorkflowError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(WorkflowError::InvalidField {
                field: "rating",
                reason: format!("{value} is outside 1..=5"),
            })
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub client_name: String,
    pub client_company: Option<String>,
    pub rating: Rating,
    pub comment: String,
    pub project_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryData {
    pub portfolio_items: Vec<PortfolioItem>,
    pub certificates: Vec<BinaryRef>,
    pub testimonials: Vec<Testimonial>,
}

impl Default for GalleryData {
    fn default() -> Self {
        Self {
            portfolio_items: (1..=MAX_PORTFOLIO_ITEMS)
                .map(|slot| PortfolioItem::empty(slot.to_string()))
                .collect(),
            certificates: Vec::new(),
            testimonials: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryPatch {
    pub portfolio_items: Option<Vec<PortfolioItem>>,
    pub certificates: Option<Vec<BinaryRef>>,
    pub testimonials: Option<Vec<Testimonial>>,
}

impl GalleryPatch {
    pub(crate) fn merge_into(self, data: &mut GalleryData) -> Result<(), WorkflowError> {
        if let Some(items) = &self.portfolio_items {
            if items.len() > MAX_PORTFOLIO_ITEMS {
                return Err(WorkflowError::TooManyPortfolioItems {
                    max: MAX_PORTFOLIO_ITEMS,
                    got: items.len(),
                });
            }
        }

        if let Some(items) = self.portfolio_items {
            data.portfolio_items = items;
        }
        if let Some(certificates) = self.certificates {
            data.certificates = certificates;
        }
        if let Some(testimonials) = self.testimonials {
            data.testimonials = testimonials;
        }
        Ok(())
    }
}
