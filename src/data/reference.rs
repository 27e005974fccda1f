//! Static game reference tables
//!
//! Values the API does not expose: food energy, pet boost items and the pet
//! species list with their adventure categories.

/// A food item and the pet energy it restores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodItem {
    pub name: &'static str,
    pub energy: i64,
}

/// A pet adventure boost, its worth in BC and its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetBoostItem {
    pub name: &'static str,
    pub worth: i64,
    pub effect: &'static str,
}

/// Adventure category a pet species belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetCategory {
    Fish,
    Hunt,
    Explore,
    Mine,
}

impl PetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetCategory::Fish => "Fish",
            PetCategory::Hunt => "Hunt",
            PetCategory::Explore => "Explore",
            PetCategory::Mine => "Mine",
        }
    }

    /// Parses a category name, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fish" => Some(PetCategory::Fish),
            "hunt" => Some(PetCategory::Hunt),
            "explore" => Some(PetCategory::Explore),
            "mine" => Some(PetCategory::Mine),
            _ => None,
        }
    }
}

/// A pet species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetSpecies {
    pub icon: &'static str,
    pub name: &'static str,
    pub category: PetCategory,
}

pub const FOOD_ITEMS: &[FoodItem] = &[
    FoodItem { name: "Seaweed", energy: 25 },
    FoodItem { name: "Sardine", energy: 50 },
    FoodItem { name: "Exotic Bean", energy: 150 },
    FoodItem { name: "Prawn", energy: 150 },
    FoodItem { name: "Red Mushroom", energy: 200 },
    FoodItem { name: "Bird Nest", energy: 300 },
    FoodItem { name: "Jellyfish", energy: 350 },
    FoodItem { name: "Soybean", energy: 500 },
    FoodItem { name: "Milk", energy: 500 },
    FoodItem { name: "Prime Steak", energy: 600 },
    FoodItem { name: "Ocean Crab", energy: 750 },
    FoodItem { name: "Blueberry", energy: 750 },
    FoodItem { name: "Golden Wheat", energy: 1_000 },
    FoodItem { name: "Russet Potato", energy: 1_000 },
    FoodItem { name: "Blowfish", energy: 2_500 },
    FoodItem { name: "Electric Eel", energy: 5_000 },
    FoodItem { name: "Strawberry", energy: 7_500 },
    FoodItem { name: "Kiwi", energy: 12_500 },
    FoodItem { name: "Seafood Salad", energy: 23_000 },
    FoodItem { name: "Great White", energy: 25_000 },
    FoodItem { name: "Mango", energy: 25_000 },
    FoodItem { name: "Hearty Burger", energy: 32_500 },
    FoodItem { name: "Melon", energy: 50_000 },
    FoodItem { name: "Warm Broth", energy: 58_100 },
    FoodItem { name: "Pearled Oyster", energy: 100_000 },
    FoodItem { name: "Stone Soup", energy: 268_100 },
    FoodItem { name: "Coconut", energy: 750_000 },
    FoodItem { name: "Giant Squid", energy: 1_000_000 },
    FoodItem { name: "Pumpkin", energy: 7_500_000 },
];

pub const PET_BOOST_ITEMS: &[PetBoostItem] = &[
    PetBoostItem {
        name: "Fragrant Dogrose",
        worth: 2_500_000,
        effect: "2× Pet Adventure Speed (2h)",
    },
    PetBoostItem {
        name: "Mystical Rowan",
        worth: 25_000_000,
        effect: "4× Pet Adventure Speed (2h)",
    },
    PetBoostItem {
        name: "Legendary Aguaje",
        worth: 250_000_000,
        effect: "8× Pet Adventure Speed (2h)",
    },
    PetBoostItem {
        name: "Magic Token",
        worth: 1_000_000_000,
        effect: "10× Pet Adventure Speed (1d)",
    },
];

const fn species(icon: &'static str, name: &'static str, category: PetCategory) -> PetSpecies {
    PetSpecies {
        icon,
        name,
        category,
    }
}

pub const PET_SPECIES: &[PetSpecies] = &[
    species("🐬", "Dolphin", PetCategory::Fish),
    species("🦦", "Otter", PetCategory::Fish),
    species("🪿", "Goose", PetCategory::Fish),
    species("🦭", "Seal", PetCategory::Fish),
    species("🐳", "Whale", PetCategory::Fish),
    species("🐢", "Turtle", PetCategory::Fish),
    species("", "Dragon", PetCategory::Fish),
    species("🦅", "Eagle", PetCategory::Hunt),
    species("🐅", "Tiger", PetCategory::Hunt),
    species("🦍", "Gorilla", PetCategory::Hunt),
    species("🐊", "Crocodile", PetCategory::Hunt),
    species("🐍", "Snake", PetCategory::Hunt),
    species("", "Scorpion", PetCategory::Hunt),
    species("", "Phoenix", PetCategory::Hunt),
    species("🐩", "Poodle", PetCategory::Explore),
    species("🐕", "Dog", PetCategory::Explore),
    species("🐎", "Mustang", PetCategory::Explore),
    species("🐖", "Pig", PetCategory::Explore),
    species("🦚", "Peacock", PetCategory::Explore),
    species("🫏", "Donkey", PetCategory::Explore),
    species("🐂", "Ox", PetCategory::Explore),
    species("🐓", "Junglefowl", PetCategory::Explore),
    species("🐇", "Rabbit", PetCategory::Explore),
    species("🕊️", "Dove", PetCategory::Explore),
    species("🦘", "Kangaroo", PetCategory::Explore),
    species("", "Visitor", PetCategory::Explore),
    species("🦇", "Bat", PetCategory::Mine),
    species("🐀", "Rat", PetCategory::Mine),
    species("🐌", "Snail", PetCategory::Mine),
    species("🦎", "Lizard", PetCategory::Mine),
    species("", "Invader", PetCategory::Mine),
];

/// Energy restored by the named food, or 0 if it is not a food
pub fn food_energy(name: &str) -> i64 {
    FOOD_ITEMS
        .iter()
        .find(|food| food.name.eq_ignore_ascii_case(name))
        .map(|food| food.energy)
        .unwrap_or(0)
}

/// Looks up a pet boost by name, case-insensitive
pub fn pet_boost(name: &str) -> Option<&'static PetBoostItem> {
    PET_BOOST_ITEMS
        .iter()
        .find(|boost| boost.name.eq_ignore_ascii_case(name))
}

/// Adventure category of the named species
pub fn pet_category(name: &str) -> Option<PetCategory> {
    PET_SPECIES
        .iter()
        .find(|pet| pet.name.eq_ignore_ascii_case(name))
        .map(|pet| pet.category)
}

/// All species in a category, in table order
pub fn species_in_category(category: PetCategory) -> Vec<&'static PetSpecies> {
    PET_SPECIES
        .iter()
        .filter(|pet| pet.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_energy_is_case_insensitive() {
        assert_eq!(food_energy("kiwi"), 12_500);
        assert_eq!(food_energy("Pumpkin"), 7_500_000);
        assert_eq!(food_energy("Rock"), 0);
    }

    #[test]
    fn test_pet_boost_lookup() {
        let boost = pet_boost("magic token").unwrap();
        assert_eq!(boost.worth, 1_000_000_000);
        assert!(boost.effect.contains("1d"));
        assert!(pet_boost("Sunflower").is_none());
    }

    #[test]
    fn test_pet_category_lookup() {
        assert_eq!(pet_category("whale"), Some(PetCategory::Fish));
        assert_eq!(pet_category("Invader"), Some(PetCategory::Mine));
        assert_eq!(pet_category("Unicorn"), None);
    }

    #[test]
    fn test_species_in_category() {
        let mine = species_in_category(PetCategory::Mine);
        let names: Vec<&str> = mine.iter().map(|pet| pet.name).collect();
        assert_eq!(names, vec!["Bat", "Rat", "Snail", "Lizard", "Invader"]);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for category in [
            PetCategory::Fish,
            PetCategory::Hunt,
            PetCategory::Explore,
            PetCategory::Mine,
        ] {
            assert_eq!(PetCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(PetCategory::parse("fly"), None);
    }
}
