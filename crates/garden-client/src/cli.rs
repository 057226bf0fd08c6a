use clap::{Args, Parser, Subcommand};

use garden_shared::{Health, NewPlant, PlantId, PlantPatch, Sunlight};

use crate::api::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "garden")]
#[command(about = "Track your plants and when you last watered them")]
pub struct Cli {
    /// Base URL of the plant API
    #[arg(long, env = "GARDEN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List plants, optionally filtered by name or species
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one plant
    Show {
        #[arg(long)]
        id: PlantId,
    },
    /// Add a new plant
    Add(AddArgs),
    /// Change fields of an existing plant
    Update(UpdateArgs),
    /// Record that a plant was watered just now
    Water {
        #[arg(long)]
        id: PlantId,
    },
    /// Remove a plant
    Remove {
        #[arg(long)]
        id: PlantId,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short = 'n', long)]
    pub name: String,
    #[arg(short = 's', long)]
    pub species: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
    /// Days between waterings
    #[arg(short = 'f', long)]
    pub watering_frequency: Option<u32>,
    /// full, partial or shade
    #[arg(long)]
    pub sunlight: Option<Sunlight>,
    /// good, average or poor
    #[arg(long)]
    pub health: Option<Health>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<AddArgs> for NewPlant {
    fn from(args: AddArgs) -> Self {
        NewPlant {
            id: None,
            name: args.name,
            species: args.species,
            image: args.image,
            watering_frequency: args.watering_frequency,
            sunlight: args.sunlight,
            health: args.health,
            notes: args.notes,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub id: PlantId,
    #[arg(short = 'n', long)]
    pub name: Option<String>,
    #[arg(short = 's', long)]
    pub species: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(short = 'f', long)]
    pub watering_frequency: Option<u32>,
    #[arg(long)]
    pub sunlight: Option<Sunlight>,
    #[arg(long)]
    pub health: Option<Health>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl UpdateArgs {
    /// Split into the target id and the fields to change.
    pub fn into_patch(self) -> (PlantId, PlantPatch) {
        let patch = PlantPatch {
            name: self.name,
            species: self.species,
            image: self.image,
            watering_frequency: self.watering_frequency,
            sunlight: self.sunlight,
            health: self.health,
            notes: self.notes,
            ..PlantPatch::default()
        };
        (self.id, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "garden",
            "--api-url",
            "http://garden.local/api",
            "add",
            "-n",
            "Basil",
            "--sunlight",
            "full",
            "-f",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://garden.local/api");
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        let new = NewPlant::from(args);
        assert_eq!(new.name, "Basil");
        assert_eq!(new.sunlight, Some(Sunlight::Full));
        assert_eq!(new.watering_frequency, Some(2));
        assert_eq!(new.health, None);
    }

    #[test]
    fn test_parse_update_builds_patch() {
        let cli = Cli::try_parse_from(["garden", "update", "--id", "4", "--health", "poor"]).unwrap();

        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        let (id, patch) = args.into_patch();
        assert_eq!(id, 4);
        assert_eq!(patch.health, Some(Health::Poor));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_rejects_unknown_sunlight() {
        assert!(Cli::try_parse_from(["garden", "add", "-n", "Fern", "--sunlight", "blazing"]).is_err());
    }
}
