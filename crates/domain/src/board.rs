//! Board reference table.
//!
//! Forty fixed tiles, indexed `0..40`. Pure data: nothing here knows about
//! players or ownership.

use serde::Serialize;

/// Number of tiles on the board.
pub const BOARD_SIZE: u8 = 40;

/// Tile index of the JAIL corner.
pub const JAIL_POSITION: u8 = 10;

/// Money credited when a move wraps past tile 0.
pub const GO_BONUS: i64 = 200;

/// Name of the corner that sends the player to jail.
pub const GO_TO_JAIL: &str = "GO TO JAIL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileKind {
    Property,
    Chest,
    Chance,
    Tax,
    Corner,
    Station,
    Utility,
}

/// Static attributes of one board tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: u8,
    pub name: &'static str,
    pub price: i64,
    pub rent: i64,
    pub color: &'static str,
    #[serde(rename = "type")]
    pub kind: TileKind,
}

impl Tile {
    pub fn is_property(&self) -> bool {
        self.kind == TileKind::Property
    }

    pub fn is_go_to_jail(&self) -> bool {
        self.kind == TileKind::Corner && self.name == GO_TO_JAIL
    }
}

const fn tile(
    id: u8,
    name: &'static str,
    price: i64,
    rent: i64,
    color: &'static str,
    kind: TileKind,
) -> Tile {
    Tile {
        id,
        name,
        price,
        rent,
        color,
        kind,
    }
}

use TileKind::{Chance, Chest, Corner, Property, Station, Tax, Utility};

const WHITE: &str = "#FFFFFF";

pub static BOARD: [Tile; BOARD_SIZE as usize] = [
    tile(0, "START", 0, 0, WHITE, Corner),
    tile(1, "Dharavi Slums", 60, 2, "#8B4513", Property),
    tile(2, "COMMUNITY CHEST", 0, 0, WHITE, Chest),
    tile(3, "Mumbai Chawl", 60, 4, "#8B4513", Property),
    tile(4, "INCOME TAX", 0, 200, WHITE, Tax),
    tile(5, "CST Station", 200, 25, "#000000", Station),
    tile(6, "Jaipur Pink City", 100, 6, "#FF69B4", Property),
    tile(7, "CHANCE", 0, 0, WHITE, Chance),
    tile(8, "Udaipur Lake", 100, 6, "#FF69B4", Property),
    tile(9, "Jaisalmer Fort", 120, 8, "#FF69B4", Property),
    tile(10, "JAIL", 0, 0, WHITE, Corner),
    tile(11, "Kolkata Howrah", 140, 10, "#FF00FF", Property),
    tile(12, "ELECTRIC COMPANY", 150, 0, WHITE, Utility),
    tile(13, "Victoria Memorial", 140, 10, "#FF00FF", Property),
    tile(14, "Eden Gardens", 160, 12, "#FF00FF", Property),
    tile(15, "Chennai Central", 200, 25, "#000000", Station),
    tile(16, "Hyderabad Cyber", 180, 14, "#FFA500", Property),
    tile(17, "COMMUNITY CHEST", 0, 0, WHITE, Chest),
    tile(18, "Charminar", 180, 14, "#FFA500", Property),
    tile(19, "Ramoji Film City", 200, 16, "#FFA500", Property),
    tile(20, "FREE PARKING", 0, 0, WHITE, Corner),
    tile(21, "Bangalore Tech", 220, 18, "#FF0000", Property),
    tile(22, "CHANCE", 0, 0, WHITE, Chance),
    tile(23, "Indiranagar", 220, 18, "#FF0000", Property),
    tile(24, "Electronic City", 240, 20, "#FF0000", Property),
    tile(25, "New Delhi Station", 200, 25, "#000000", Station),
    tile(26, "Connaught Place", 260, 22, "#FFFF00", Property),
    tile(27, "India Gate", 260, 22, "#FFFF00", Property),
    tile(28, "WATER WORKS", 150, 0, WHITE, Utility),
    tile(29, "Rashtrapati Bhavan", 280, 24, "#FFFF00", Property),
    tile(30, GO_TO_JAIL, 0, 0, WHITE, Corner),
    tile(31, "Pune IT Park", 300, 26, "#008000", Property),
    tile(32, "Koregaon Park", 300, 26, "#008000", Property),
    tile(33, "COMMUNITY CHEST", 0, 0, WHITE, Chest),
    tile(34, "Lavasa", 320, 28, "#008000", Property),
    tile(35, "Metro Station", 200, 25, "#000000", Station),
    tile(36, "CHANCE", 0, 0, WHITE, Chance),
    tile(37, "Gift City Gujarat", 350, 35, "#0000FF", Property),
    tile(38, "SUPER TAX", 0, 100, WHITE, Tax),
    tile(39, "Antilia", 400, 50, "#0000FF", Property),
];

/// Look up a tile by board index. `None` outside `0..40`.
pub fn lookup(index: u8) -> Option<&'static Tile> {
    BOARD.get(usize::from(index))
}
