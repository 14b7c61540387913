//! Pure view-models: trip list pagination, trip cards, the map panel, and
//! the warmup overlay state.

use serde::Serialize;

use crate::types::{Destination, Trip};

pub const TRIPS_PER_PAGE: usize = 3;

/// One page of a client-side paginated list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub current: usize,
    pub total_pages: usize,
}

/// Slice `items` into pages of `page_size`, clamping `current` into range.
pub fn paginate<T>(items: &[T], page_size: usize, current: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);
    let current = current.clamp(1, total_pages.max(1));
    let start = ((current - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    PageSlice {
        items: &items[start..end],
        current,
        total_pages,
    }
}

impl<T> PageSlice<'_, T> {
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }
}

/// Summary of a trip as shown in the plan page grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripCard {
    pub id: String,
    pub name: String,
    pub destination: String,
    pub dates: String,
    pub activity_count: usize,
    pub total_cost: String,
    pub is_public: bool,
}

impl From<&Trip> for TripCard {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            name: trip.name.clone(),
            destination: format!("{}, {}", trip.destination.name, trip.destination.country),
            dates: format!(
                "{} – {}",
                trip.start_date.format("%b %-d, %Y"),
                trip.end_date.format("%b %-d, %Y")
            ),
            activity_count: trip.activities.len(),
            total_cost: format_cost(trip.total_cost),
            is_public: trip.is_public,
        }
    }
}

/// Summary of a destination as shown in the home page grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    pub is_favorite: bool,
}

impl From<&Destination> for DestinationCard {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id.clone(),
            title: format!("{}, {}", d.name, d.country),
            description: d.description.clone(),
            price: format!("from {}", format_cost(d.price)),
            rating: format!("{:.1} ({} reviews)", d.rating, d.review_count),
            is_favorite: d.is_favorite,
        }
    }
}

/// Dollar amount with thousands separators, cents only when present.
pub fn format_cost(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (whole, frac) = (cents.abs() / 100, cents.abs() % 100);
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if cents < 0 { "-" } else { "" };
    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Value shipped in sample env files; treated as "no key".
pub const MAPS_KEY_PLACEHOLDER: &str = "your_api_key_here";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub position: LatLng,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MapRender {
    /// No usable key; nothing is loaded from the maps provider.
    Placeholder { title: String, hint: String },
    Map {
        api_key: String,
        center: LatLng,
        zoom: u8,
        markers: Vec<MapMarker>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripMap {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl Default for TripMap {
    fn default() -> Self {
        Self {
            center: LatLng {
                lat: 37.7749,
                lng: -122.4194,
            },
            zoom: 10,
            markers: Vec::new(),
        }
    }
}

impl TripMap {
    /// The overview shown on the plan page.
    pub fn plan_overview() -> Self {
        let marker = |lat, lng, title: &str| MapMarker {
            position: LatLng { lat, lng },
            title: Some(title.to_string()),
        };
        Self {
            zoom: 4,
            markers: vec![
                marker(35.6762, 139.6503, "Tokyo, Japan"),
                marker(36.3932, 25.4615, "Santorini, Greece"),
                marker(-8.3405, 115.0920, "Bali, Indonesia"),
            ],
            ..Self::default()
        }
    }

    pub fn render(&self, api_key: Option<&str>) -> MapRender {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != MAPS_KEY_PLACEHOLDER);
        let Some(key) = key else {
            return MapRender::Placeholder {
                title: "Google Maps API key not configured".to_string(),
                hint: "Please add TRIPPY_MAPS_API_KEY to your .env file".to_string(),
            };
        };
        let mut markers = Vec::with_capacity(self.markers.len() + 1);
        markers.push(MapMarker {
            position: self.center,
            title: None,
        });
        markers.extend(self.markers.iter().cloned());
        MapRender::Map {
            api_key: key.to_string(),
            center: self.center,
            zoom: self.zoom,
            markers,
        }
    }
}

// ---------------------------------------------------------------------------
// Warmup
// ---------------------------------------------------------------------------

/// Whether the "server is waking up" overlay is visible and how many retry
/// attempts it has observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarmupState {
    pub is_warming_up: bool,
    pub check_count: u32,
}

impl WarmupState {
    pub fn show(&mut self) {
        self.is_warming_up = true;
    }

    /// Hiding also resets the attempt counter.
    pub fn hide(&mut self) {
        self.is_warming_up = false;
        self.check_count = 0;
    }

    pub fn increment(&mut self) {
        self.check_count += 1;
    }

    pub fn title(&self) -> &'static str {
        "Warming up the server…"
    }

    pub fn status_line(&self) -> String {
        if self.check_count > 1 {
            format!("Still loading… (Attempt {})", self.check_count)
        } else {
            "Please wait while we wake up the backend server. *This may take a couple minutes."
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_last_page_holds_remainder() {
        let items: Vec<u32> = (0..7).collect();
        let page = paginate(&items, TRIPS_PER_PAGE, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &[6]);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn paginate_page_counts_follow_ceil() {
        for n in 0..=10usize {
            let items: Vec<usize> = (0..n).collect();
            let first = paginate(&items, TRIPS_PER_PAGE, 1);
            assert_eq!(first.page_numbers().len(), n.div_ceil(3), "n = {n}");
            let last = paginate(&items, TRIPS_PER_PAGE, first.total_pages);
            let expected = if n == 0 { 0 } else { n - (first.total_pages - 1) * 3 };
            assert_eq!(last.items.len(), expected, "n = {n}");
        }
    }

    #[test]
    fn paginate_clamps_out_of_range_page() {
        let items = [1, 2, 3, 4];
        let page = paginate(&items, 3, 9);
        assert_eq!(page.current, 2);
        assert_eq!(page.items, &[4]);
        let empty: [u8; 0] = [];
        let page = paginate(&empty, 3, 0);
        assert_eq!(page.current, 1);
        assert!(!page.show_controls());
    }

    #[test]
    fn format_cost_groups_thousands() {
        assert_eq!(format_cost(0.0), "$0");
        assert_eq!(format_cost(1800.0), "$1,800");
        assert_eq!(format_cost(1234567.5), "$1,234,567.50");
    }

    #[test]
    fn map_without_key_renders_placeholder() {
        let map = TripMap::plan_overview();
        assert!(matches!(map.render(None), MapRender::Placeholder { .. }));
        assert!(matches!(map.render(Some("")), MapRender::Placeholder { .. }));
        assert!(matches!(
            map.render(Some(MAPS_KEY_PLACEHOLDER)),
            MapRender::Placeholder { .. }
        ));
    }

    #[test]
    fn map_with_key_adds_center_marker() {
        let map = TripMap::plan_overview();
        match map.render(Some("real-key")) {
            MapRender::Map { api_key, zoom, markers, .. } => {
                assert_eq!(api_key, "real-key");
                assert_eq!(zoom, 4);
                assert_eq!(markers.len(), 4);
                assert!(markers[0].title.is_none());
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn warmup_status_line_mentions_attempt_after_first() {
        let mut state = WarmupState::default();
        state.show();
        state.increment();
        assert!(state.status_line().starts_with("Please wait"));
        state.increment();
        assert_eq!(state.status_line(), "Still loading… (Attempt 2)");
        state.hide();
        assert_eq!(state, WarmupState::default());
    }
}
