#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use neon_battleships::{
    cli::{HotSeat, MatchSetup},
    init_logging, validate, ShipCounts, DEFAULT_GRID_SIZE, DEFAULT_PLAYER_NAMES,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

/// Two players, one device: place your fleets, then take turns firing.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[arg(long, default_value = DEFAULT_PLAYER_NAMES[0])]
    player1: String,
    #[arg(long, default_value = DEFAULT_PLAYER_NAMES[1])]
    player2: String,
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, help = "Grid edge length (5 to 10)")]
    grid_size: usize,
    #[arg(long, default_value_t = 1)]
    carrier: usize,
    #[arg(long, default_value_t = 1)]
    battleship: usize,
    #[arg(long, default_value_t = 1)]
    cruiser: usize,
    #[arg(long, default_value_t = 1)]
    submarine: usize,
    #[arg(long, default_value_t = 1)]
    destroyer: usize,
    #[arg(long, help = "Place both fleets randomly")]
    auto_place: bool,
    #[arg(long, help = "Fix RNG seed for reproducible random placement (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[cfg(feature = "std")]
impl Cli {
    fn counts(&self) -> ShipCounts {
        ShipCounts::none()
            .with("carrier", self.carrier)
            .with("battleship", self.battleship)
            .with("cruiser", self.cruiser)
            .with("submarine", self.submarine)
            .with("destroyer", self.destroyer)
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let counts = cli.counts();

    let validation = validate(cli.grid_size, &counts);
    if !validation.ok() {
        for message in validation.messages() {
            eprintln!("{}", message);
        }
        anyhow::bail!(
            "invalid setup (grid area {}, ship area {})",
            validation.grid_area,
            validation.ship_area
        );
    }

    let mut rng = if let Some(s) = cli.seed {
        println!("Using fixed seed: {} (placement will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let setup = MatchSetup {
        player1: cli.player1,
        player2: cli.player2,
        grid_size: cli.grid_size,
        counts,
        auto_place: cli.auto_place,
    };
    let stdin = std::io::stdin();
    let mut session = HotSeat::new(setup, stdin.lock(), std::io::stdout());
    session.run(&mut rng)
}
