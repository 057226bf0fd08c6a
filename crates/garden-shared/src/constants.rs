/// Application name
pub const APP_NAME: &str = "GardenTracker";

/// Image used when a plant is created without one
pub const DEFAULT_PLANT_IMAGE: &str = "https://images.unsplash.com/photo-1614594975525-e45190c55d0b";

/// Watering frequency (days) used when a plant is created without one
pub const DEFAULT_WATERING_FREQUENCY_DAYS: u32 = 7;

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Path prefix under which every plant route is mounted
pub const API_BASE_PATH: &str = "/api";

/// Default location of the plant document, relative to the server's working directory
pub const DEFAULT_PLANTS_FILE: &str = "./data/plants.json";

/// Response messages
pub const MSG_PLANT_NOT_FOUND: &str = "Plant not found";
pub const MSG_PLANT_DELETED: &str = "Plant deleted successfully";
pub const MSG_INVALID_PLANT: &str = "Invalid plant data";
