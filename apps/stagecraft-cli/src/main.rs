use clap::{Parser, Subcommand};
use stagecraft_common::ImageSize;
use stagecraft_sprites::{
    NarrativeController, SpriteRegistry, SpriteStoreSave, StaticImageResolver,
};
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

/// Images known to the demo resolver. Anything else fails to resolve.
const DEMO_IMAGES: &[(&str, u32, u32)] = &[
    ("bg/forest.png", 1280, 720),
    ("portraits/alice.png", 256, 512),
    ("props/door.png", 96, 160),
];

#[derive(Parser)]
#[command(name = "stagecraft-cli", about = "CLI tool for stagecraft sprite operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Create, click and delete sprites against a demo image table
    Demo {
        /// Number of sprites to create
        #[arg(short, long, default_value = "4")]
        sprites: usize,
    },
    /// Print the save snapshot for a populated registry and verify restore
    Save {
        /// Number of sprites to create
        #[arg(short, long, default_value = "3")]
        sprites: usize,
    },
}

/// Narrative controller that only reports where execution would go.
struct LoggingController;

impl NarrativeController for LoggingController {
    fn jump_to_label(&self, label: &str) {
        tracing::info!(label, "jump to label");
        println!("-> jump to label '{label}'");
    }
}

fn demo_registry() -> SpriteRegistry {
    let resolver = DEMO_IMAGES
        .iter()
        .fold(StaticImageResolver::new(), |r, &(image, w, h)| {
            r.with(image, ImageSize::new(w, h))
        });
    SpriteRegistry::new(Rc::new(resolver), Rc::new(LoggingController))
}

/// Create `count` sprites cycling through the demo images plus one unknown image.
fn populate(registry: &SpriteRegistry, count: usize) {
    for i in 0..count {
        let image = match DEMO_IMAGES.get(i % (DEMO_IMAGES.len() + 1)) {
            Some((image, _, _)) => *image,
            None => "missing/ghost.png",
        };
        let sprite = registry.create_sprite(image, i as f32 * 100.0, 200.0);
        if i % 2 == 1 {
            registry.with_sprite_mut(sprite.id, |s| {
                s.on_click = Some(format!("scene_{i}"));
                s.layer = i as i32;
            });
        }
    }
}

/// Give pending image resolutions a chance to land.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn print_sprites(registry: &SpriteRegistry) {
    for s in registry.sprites() {
        let (min, max) = s.bounds();
        println!(
            "Sprite [{:.8}] {} pos=({:.1}, {:.1}) size={}x{} layer={} bounds=({:.1}, {:.1})..({:.1}, {:.1}){}",
            s.id.to_string(),
            s.image,
            s.x,
            s.y,
            s.width,
            s.height,
            s.layer,
            min.x,
            min.y,
            max.x,
            max.y,
            s.on_click
                .as_deref()
                .map(|l| format!(" onClick={l}"))
                .unwrap_or_default(),
        );
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Info => {
            println!("stagecraft-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("sprites: {}", stagecraft_sprites::crate_info());
        }
        Commands::Demo { sprites } => {
            println!("Sprite demo: creating {sprites} sprites");
            let registry = demo_registry();
            populate(&registry, sprites);
            println!("Before resolution:");
            print_sprites(&registry);

            settle().await;
            println!("After resolution:");
            print_sprites(&registry);

            for s in registry.sprites() {
                registry.click_sprite(&s);
            }

            if let Some(first) = registry.sprites().first().cloned() {
                registry.delete_sprite(&first);
                // Second delete only warns.
                registry.delete_sprite(&first);
                println!("Deleted {}, {} sprites remain", first.id, registry.len());
            }

            registry.reset();
            println!("After reset: {} sprites", registry.len());
        }
        Commands::Save { sprites } => {
            let registry = demo_registry();
            populate(&registry, sprites);
            settle().await;

            let save = registry.generate_save_data();
            println!("{}", save.to_json_pretty()?);

            let restored = demo_registry();
            restored.load_save_data(SpriteStoreSave::from_json(&save.to_json()?)?);
            let matches = restored.sprites() == registry.sprites();
            println!(
                "Restore: {} sprites, {}",
                restored.len(),
                if matches { "OK" } else { "MISMATCH" }
            );
            if !matches {
                anyhow::bail!("restored sprites differ from saved sprites");
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    LocalSet::new().run_until(run(cli.command)).await
}
