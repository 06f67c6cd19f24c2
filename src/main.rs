//! RQG Damage - command line harness
//!
//! Applies damage, heals wounds, rolls weapon damage and rolls abilities against a character sheet
//! stored as TOML. Results are printed as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use rqg_damage::ability::roll_ability;
use rqg_damage::combat::{
    roll_damage, CombatManeuver, DamageRollType, DiceFormula, Weapon, WeaponKind,
};
use rqg_damage::core::config::RulesConfig;
use rqg_damage::core::error::Result;
use rqg_damage::health::{apply_damage, heal_wound, ActorHealthState, CharacterHealth};

/// Hit location damage and healing for percentile tabletop characters
#[derive(Parser, Debug)]
#[command(name = "rqg-damage")]
#[command(about = "Resolve damage, healing and ability rolls against a character sheet")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a humanoid character sheet
    New {
        /// Character name used in notifications
        #[arg(long)]
        name: String,

        /// Total hit points
        #[arg(long)]
        hp: u32,

        /// Sheet to write
        #[arg(long)]
        sheet: PathBuf,
    },

    /// Apply damage to one hit location
    Damage {
        #[arg(long)]
        sheet: PathBuf,

        /// Location name, e.g. leftLeg
        #[arg(long)]
        location: String,

        #[arg(long)]
        amount: u32,

        /// Wound the location without reducing total hit points
        #[arg(long)]
        bypass_hp: bool,

        /// Save the updated sheet
        #[arg(long, short = 'w')]
        write: bool,
    },

    /// Heal one wound on a hit location
    Heal {
        #[arg(long)]
        sheet: PathBuf,

        #[arg(long)]
        location: String,

        /// Index into the location's wound list
        #[arg(long, default_value_t = 0)]
        wound: usize,

        #[arg(long)]
        points: u32,

        #[arg(long, short = 'w')]
        write: bool,
    },

    /// Roll weapon damage, optionally applying it to a sheet
    Strike {
        /// Weapon damage, e.g. 1d8+1
        #[arg(long)]
        damage: DiceFormula,

        /// Wielder's damage bonus, e.g. 1d4 or -1d4
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        bonus: DiceFormula,

        /// melee, thrown or projectile
        #[arg(long, default_value = "melee")]
        kind: WeaponKind,

        /// crush, slash, impale or parry
        #[arg(long)]
        maneuver: CombatManeuver,

        /// normal, special or max-special
        #[arg(long, default_value = "normal")]
        roll_type: DamageRollType,

        /// Attack maneuvers the weapon supports, defaults to the maneuver used
        #[arg(long, value_delimiter = ',')]
        weapon_maneuvers: Vec<CombatManeuver>,

        /// Sheet to apply the damage to
        #[arg(long, requires = "location")]
        sheet: Option<PathBuf>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, short = 'w')]
        write: bool,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Roll an ability check
    Roll {
        /// Label for the roll, e.g. Broadsword
        #[arg(long, default_value = "Ability")]
        flavor: String,

        #[arg(long)]
        chance: i32,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i32,

        /// Rules config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed for deterministic runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// JSON output for damage and heal commands
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    result: &'a T,
    hit_points: u32,
    health: ActorHealthState,
}

fn load_sheet(path: &Path) -> Result<CharacterHealth> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn save_sheet(path: &Path, character: &CharacterHealth) -> Result<()> {
    fs::write(path, toml::to_string_pretty(character)?)?;
    tracing::info!(?path, "Saved character sheet");
    Ok(())
}

fn print_report<T: Serialize>(result: &T, character: &CharacterHealth) -> Result<()> {
    let report = Report {
        result,
        hit_points: character.hit_points.value,
        health: character.health,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::New { name, hp, sheet } => {
            let character = CharacterHealth::humanoid(name, hp);
            save_sheet(&sheet, &character)?;
        }

        Command::Damage {
            sheet,
            location,
            amount,
            bypass_hp,
            write,
        } => {
            let mut character = load_sheet(&sheet)?;
            let location_id = character.location_by_name(&location)?.id;

            let result = apply_damage(amount, !bypass_hp, location_id, &character)?;
            result.commit(&mut character)?;
            character.refresh_health();

            if !result.notification.is_empty() {
                eprintln!("{}", result.notification);
            }
            print_report(&result, &character)?;
            if write {
                save_sheet(&sheet, &character)?;
            }
        }

        Command::Heal {
            sheet,
            location,
            wound,
            points,
            write,
        } => {
            let mut character = load_sheet(&sheet)?;
            let location_id = character.location_by_name(&location)?.id;

            let result = heal_wound(points, wound, location_id, &character)?;
            result.commit(&mut character)?;

            if !result.notification.is_empty() {
                eprintln!("{}", result.notification);
            }
            print_report(&result, &character)?;
            if write {
                save_sheet(&sheet, &character)?;
            }
        }

        Command::Strike {
            damage,
            bonus,
            kind,
            maneuver,
            roll_type,
            mut weapon_maneuvers,
            sheet,
            location,
            write,
            seed,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);

            if weapon_maneuvers.is_empty() {
                weapon_maneuvers.push(maneuver);
            }
            let weapon = Weapon::new("Weapon", damage, kind, weapon_maneuvers);
            let roll = roll_damage(&weapon, maneuver, &bonus, roll_type, &mut rng);
            eprintln!("Damage {}", roll.total());

            match (sheet, location) {
                (Some(sheet), Some(location)) => {
                    let mut character = load_sheet(&sheet)?;
                    let location_id = character.location_by_name(&location)?.id;

                    let result = apply_damage(roll.damage(), true, location_id, &character)?;
                    result.commit(&mut character)?;
                    character.refresh_health();

                    if !result.notification.is_empty() {
                        eprintln!("{}", result.notification);
                    }
                    print_report(&result, &character)?;
                    if write {
                        save_sheet(&sheet, &character)?;
                    }
                }
                _ => println!("{}", serde_json::to_string_pretty(&roll)?),
            }
        }

        Command::Roll {
            flavor,
            chance,
            modifier,
            config,
            seed,
        } => {
            let config = match config {
                Some(path) => RulesConfig::load(&path)?,
                None => RulesConfig::default(),
            };
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);

            let ability_roll = roll_ability(flavor, chance, modifier, &config, &mut rng);
            eprintln!("{}", ability_roll.describe());
            println!("{}", serde_json::to_string_pretty(&ability_roll)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}
