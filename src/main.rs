use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use mediastrip::input::{InputEvent, NavKey};
use mediastrip::layout::Animator;
use mediastrip::models::MediaType;
use mediastrip::render::HeadlessRenderer;
use mediastrip::scanner::{FileScanner, ScanConfig};
use mediastrip::{Gallery, GalleryOptions, Outcome};

const USAGE: &str = "usage: mediastrip <dir> [--viewport PX] [--kind image|video|book] [commands..]
commands: left right home end wheel-up wheel-down delete pane select:N delete:N click:PX";

const DEFAULT_VIEWPORT: f32 = 800.0;

struct Args {
    dir: PathBuf,
    viewport: f32,
    kind: Option<MediaType>,
    commands: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut dir = None;
    let mut viewport = DEFAULT_VIEWPORT;
    let mut kind = None;
    let mut commands = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--viewport" => {
                let value = args.next().context("--viewport needs a value")?;
                viewport = value
                    .parse()
                    .with_context(|| format!("Invalid viewport width: {}", value))?;
            }
            "--kind" => {
                let value = args.next().context("--kind needs a value")?;
                kind = Some(
                    MediaType::parse(&value)
                        .with_context(|| format!("Unknown media kind: {}", value))?,
                );
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if dir.is_none() => dir = Some(PathBuf::from(arg)),
            _ => commands.push(arg),
        }
    }

    Ok(Args {
        dir: dir.context(USAGE)?,
        viewport,
        kind,
        commands,
    })
}

fn parse_command(command: &str, gallery: &Gallery<HeadlessRenderer>) -> Result<InputEvent> {
    let item_at = |value: &str| -> Result<_> {
        let index: usize = value
            .parse()
            .with_context(|| format!("Invalid item index: {}", value))?;
        gallery
            .items()
            .get_index(index)
            .map(|item| item.id)
            .with_context(|| format!("No item at index {}", index))
    };

    let event = match command.split_once(':') {
        None => match command {
            "left" => InputEvent::Key(NavKey::Left),
            "right" => InputEvent::Key(NavKey::Right),
            "home" => InputEvent::Key(NavKey::Home),
            "end" => InputEvent::Key(NavKey::End),
            "delete" => InputEvent::Key(NavKey::Delete),
            "wheel-up" => InputEvent::Wheel { delta_y: -1.0 },
            "wheel-down" => InputEvent::Wheel { delta_y: 1.0 },
            "pane" => InputEvent::PaneClick,
            _ => bail!("Unknown command: {}", command),
        },
        Some(("select", index)) => InputEvent::ThumbnailClick(item_at(index)?),
        Some(("delete", index)) => InputEvent::DeleteClick(item_at(index)?),
        Some(("click", offset)) => InputEvent::StripClick {
            offset: offset
                .parse()
                .with_context(|| format!("Invalid click offset: {}", offset))?,
        },
        Some(_) => bail!("Unknown command: {}", command),
    };
    Ok(event)
}

fn print_state(label: &str, gallery: &Gallery<HeadlessRenderer>) {
    let active = gallery
        .active_index()
        .map_or_else(|| "-".to_string(), |i| i.to_string());
    let position = gallery
        .position()
        .map_or_else(|| "-".to_string(), |i| i.to_string());
    println!(
        "{:<12} items={} position={} scroll={:.1} correction={:.1} active={}",
        label,
        gallery.items().len(),
        position,
        gallery.scroll_offset(),
        gallery.trailing_correction(),
        active
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediastrip=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let mut options = GalleryOptions::from_env()?;
    if let Some(kind) = args.kind {
        options.player = Some(kind);
    }

    let config = ScanConfig {
        kind: options.player.unwrap_or(MediaType::Image),
        stop_class: options.image_stop_class.clone(),
        ..Default::default()
    };
    let scan = FileScanner::with_config(config).scan(&args.dir)?;

    let renderer = HeadlessRenderer::new();
    let mut gallery = Gallery::new(scan.container, options, args.viewport, renderer.clone())?;
    let mut animator = Animator::spawn(gallery.subscribe_transitions(), renderer.clone())
        .context("Failed to start strip animator")?;
    let deletions = gallery.subscribe_deletions();
    info!(id = %gallery.id(), dir = ?args.dir, "Replaying {} commands", args.commands.len());

    print_state("start", &gallery);
    for command in &args.commands {
        let event = parse_command(command, &gallery)?;
        match gallery.handle(event) {
            Outcome::Unchanged => println!("{:<12} unchanged", command),
            outcome => print_state(&format!("{:?}", outcome), &gallery),
        }
        for notice in deletions.try_iter() {
            println!(
                "{:<12} removed {} ({})",
                "",
                notice.resource_locator,
                notice.field_name.as_deref().unwrap_or("-")
            );
        }
    }

    animator.shutdown();
    println!("strip offset {:.1}px", renderer.strip_offset());
    Ok(())
}
