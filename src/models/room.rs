use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::gateway::MultipartForm;

use super::EntityId;

/// Upper bound on images attached to one room.
pub const MAX_ROOM_IMAGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomImage {
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: f64,
    pub capacity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub images: Vec<RoomImage>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Room {
    pub fn primary_image(&self) -> Option<&RoomImage> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
    }

    fn created(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// Sort orders offered by the rooms page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomSort {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    NameAsc,
    Capacity,
}

impl RoomSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomSort::Newest => "newest",
            RoomSort::PriceLow => "price_low",
            RoomSort::PriceHigh => "price_high",
            RoomSort::NameAsc => "name_asc",
            RoomSort::Capacity => "capacity",
        }
    }

    fn compare(&self, a: &Room, b: &Room) -> Ordering {
        match self {
            RoomSort::PriceLow => a.price.total_cmp(&b.price),
            RoomSort::PriceHigh => b.price.total_cmp(&a.price),
            RoomSort::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            RoomSort::Capacity => b.capacity.cmp(&a.capacity),
            // Undated rooms go last.
            RoomSort::Newest => match (a.created(), b.created()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for RoomSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(RoomSort::Newest),
            "price_low" => Ok(RoomSort::PriceLow),
            "price_high" => Ok(RoomSort::PriceHigh),
            "name_asc" => Ok(RoomSort::NameAsc),
            "capacity" => Ok(RoomSort::Capacity),
            other => Err(format!("unknown room sort '{}'", other)),
        }
    }
}

/// Client-side search and ordering over the loaded rooms.
///
/// Rooms are not paginated by the backend, so this never triggers a refetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomQuery {
    pub search: String,
    pub sort: RoomSort,
}

impl RoomQuery {
    pub fn apply(&self, rooms: &[Room]) -> Vec<Room> {
        let term = self.search.trim().to_lowercase();
        let mut out: Vec<Room> = rooms
            .iter()
            .filter(|r| term.is_empty() || r.name.to_lowercase().contains(&term))
            .cloned()
            .collect();
        out.sort_by(|a, b| self.sort.compare(a, b));
        out
    }
}

/// Header figures of the rooms page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomSummary {
    pub total: usize,
    pub average_price: u64,
    pub max_capacity: u32,
    pub with_images: usize,
}

impl RoomSummary {
    pub fn from_rooms(rooms: &[Room]) -> Self {
        if rooms.is_empty() {
            return Self::default();
        }
        let total_price: f64 = rooms.iter().map(|r| r.price).sum();
        Self {
            total: rooms.len(),
            average_price: (total_price / rooms.len() as f64).round().max(0.0) as u64,
            max_capacity: rooms.iter().map(|r| r.capacity).max().unwrap_or(0),
            with_images: rooms.iter().filter(|r| !r.images.is_empty()).count(),
        }
    }
}

/// A new image to upload with a room.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Room create/edit form. `id` is set when editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomDraft {
    pub id: Option<EntityId>,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub capacity: u32,
    pub description: String,
    pub images: Vec<ImageUpload>,
}

impl RoomDraft {
    /// Checks the form before it is sent; the message is shown inline.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Room name is required.".to_string());
        }
        if self.price < 0.0 {
            return Err("Price cannot be negative.".to_string());
        }
        if self.capacity == 0 {
            return Err("Capacity must be at least 1.".to_string());
        }
        if self.images.len() > MAX_ROOM_IMAGES {
            return Err(format!("You can upload a maximum of {} images.", MAX_ROOM_IMAGES));
        }
        Ok(())
    }

    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        if let Some(id) = self.id {
            form = form.text("id", id.to_string());
        }
        form = form
            .text("name", self.name.clone())
            .text("slug", self.slug.clone())
            .text("price", self.price.to_string())
            .text("capacity", self.capacity.to_string())
            .text("description", self.description.clone());
        for image in &self.images {
            form = form.file(
                "images[]",
                image.file_name.replace(char::is_whitespace, "-"),
                image.content_type.clone(),
                image.bytes.clone(),
            );
        }
        form
    }
}
