//! Sample hotel catalogue for fresh databases.
//!
//! Image paths are relative to the server's public directory.

use tracing::info;
use wanderlust_core::DatabaseError;

use super::db::ApiDatabase;
use super::models::NewHotel;

struct SampleHotel {
    name: &'static str,
    address: &'static str,
    city: &'static str,
    country: &'static str,
    description: &'static str,
    price_per_night: f64,
    image_url: &'static str,
    star_rating: Option<i64>,
    rating_text: &'static str,
    rating_score: f64,
    review_count: i64,
    location_score: f64,
    distance_from_downtown: &'static str,
    room_type: &'static str,
    room_beds: &'static str,
    /// Breakfast included, free cancellation and no prepayment all come
    /// together in this catalogue.
    flexible: bool,
    promo_message: Option<&'static str>,
}

const SAMPLE_HOTELS: &[SampleHotel] = &[
    SampleHotel {
        name: "Mokkoan",
        address: "Kita, Tokyo (Akabane)",
        city: "Tokyo",
        country: "Japan",
        description: "Japanese-Style Room with Garden View 101. Breakfast included. Free cancellation. \
                      No prepayment needed, pay at the property.",
        price_per_night: 1372.0,
        image_url: "/photo/mokkoan.jpg",
        star_rating: Some(2),
        rating_text: "Exceptional",
        rating_score: 9.9,
        review_count: 300,
        location_score: 9.3,
        distance_from_downtown: "9.6 km from downtown",
        room_type: "Japanese-Style Room with Garden View 101",
        room_beds: "3 futon beds",
        flexible: true,
        promo_message: Some("Only 1 room left at this price on our site"),
    },
    SampleHotel {
        name: "The Langham Hong Kong",
        address: "Yau Tsim Mong District, Hong Kong (Tsim Sha Tsui)",
        city: "Hong Kong",
        country: "China",
        description: "Superior City View Twin Room. Sustainability certification. Subway Access.",
        price_per_night: 2392.0,
        image_url: "/photo/The Langham Hong Kong.jpg",
        star_rating: Some(5),
        rating_text: "Excellent",
        rating_score: 8.6,
        review_count: 1634,
        location_score: 9.4,
        distance_from_downtown: "1.9 km from downtown",
        room_type: "Superior City View Twin Room",
        room_beds: "2 twin beds",
        flexible: false,
        promo_message: None,
    },
    SampleHotel {
        name: "Star Hostel Taipei Main Station",
        address: "Datong District, Taipei",
        city: "Taipei",
        country: "Taiwan",
        description: "Double Room. Breakfast included. Free cancellation. \
                      No prepayment needed, pay at the property.",
        price_per_night: 864.0,
        image_url: "/photo/Star Hostel Taipei Main Station.jpg",
        star_rating: Some(1),
        rating_text: "Wonderful",
        rating_score: 9.3,
        review_count: 4505,
        location_score: 9.6,
        distance_from_downtown: "0.5 km from downtown",
        room_type: "Double Room",
        room_beds: "1 full bed",
        flexible: true,
        promo_message: Some("Only 5 rooms left at this price on our site"),
    },
    SampleHotel {
        name: "Osaka Ukiyoe Ryokan",
        address: "Chuo Ward, Osaka",
        city: "Osaka",
        country: "Japan",
        description: "Japanese-Style Room. Subway Access.",
        price_per_night: 5586.0,
        image_url: "/photo/Osaka Ukiyoe Ryokan.jpg",
        star_rating: None,
        rating_text: "Exceptional",
        rating_score: 9.8,
        review_count: 185,
        location_score: 9.7,
        distance_from_downtown: "2.4 km from downtown",
        room_type: "Japanese-Style Room",
        room_beds: "6 futon beds",
        flexible: false,
        promo_message: Some("Only 1 room left at this price on our site"),
    },
    SampleHotel {
        name: "Original Backpackers",
        address: "Jongno-Gu, Seoul",
        city: "Seoul",
        country: "South Korea",
        description: "Bed in 6-Bed Mixed Dormitory Room. Subway Access.",
        price_per_night: 1052.0,
        image_url: "/photo/Original Backpackers.jpg",
        star_rating: Some(1),
        rating_text: "Exceptional",
        rating_score: 9.7,
        review_count: 231,
        location_score: 9.7,
        distance_from_downtown: "3 km from downtown",
        room_type: "Bed in 6-Bed Mixed Dormitory Room",
        room_beds: "2 beds in dorms, 2 bunk beds",
        flexible: false,
        promo_message: None,
    },
];

impl From<&SampleHotel> for NewHotel {
    fn from(sample: &SampleHotel) -> Self {
        let mut hotel = Self::new(
            sample.name,
            sample.address,
            sample.city,
            sample.country,
            sample.price_per_night,
        );
        hotel.description = Some(sample.description.to_string());
        hotel.image_url = Some(sample.image_url.to_string());
        hotel.star_rating = sample.star_rating;
        hotel.rating_text = Some(sample.rating_text.to_string());
        hotel.rating_score = Some(sample.rating_score);
        hotel.review_count = Some(sample.review_count);
        hotel.location_score = Some(sample.location_score);
        hotel.distance_from_downtown = Some(sample.distance_from_downtown.to_string());
        hotel.room_type = Some(sample.room_type.to_string());
        hotel.room_beds = Some(sample.room_beds.to_string());
        hotel.breakfast_included = sample.flexible;
        hotel.free_cancellation = sample.flexible;
        hotel.no_prepayment_needed = sample.flexible;
        hotel.promo_message = sample.promo_message.map(String::from);
        hotel
    }
}

impl ApiDatabase {
    /// Insert the sample catalogue if the hotels table is empty.
    ///
    /// Returns the number of hotels inserted, `0` when hotels already exist.
    pub async fn seed_sample_hotels(&self) -> Result<usize, DatabaseError> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hotels")
            .fetch_one(self.pool())
            .await?;
        if existing > 0 {
            info!(existing, "Hotels already present, skipping seed");
            return Ok(0);
        }

        for sample in SAMPLE_HOTELS {
            self.create_hotel(&NewHotel::from(sample)).await?;
        }
        info!(count = SAMPLE_HOTELS.len(), "Seeded sample hotels");
        Ok(SAMPLE_HOTELS.len())
    }
}
