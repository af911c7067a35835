use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{Color32, ColorImage, TextureHandle, Vec2};
use image::RgbaImage;
use planet_core::bodies::{moon_texture, star_field, sun_texture};
use planet_core::config::MAX_SEED;
use planet_core::driver::drive;
use planet_core::export::{save_config, save_textures};
use planet_core::{
    Companion, PlanetConfig, Step, TextureBuilder, TextureKind, TextureSet, Theme,
};
use tracing::{error, info};

/// Procedural planet texture viewer.
#[derive(Parser, Debug)]
#[command(name = "planet", version, about)]
struct Args {
    /// TOML file with planet settings; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate once and write PNGs instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Output directory for headless export.
    #[arg(short, long, default_value = "planet_out")]
    out: PathBuf,

    /// Base name for exported files.
    #[arg(long, default_value = "planet")]
    stem: String,

    /// Start in (or export with) the dark theme.
    #[arg(long)]
    dark: bool,
}

const BODY_WIDTH: u32 = 256;
const BODY_HEIGHT: u32 = 128;
const STAR_COUNT: usize = 1000;
const STAR_EXTENT: f32 = 100.0;

fn body_seed(config: &PlanetConfig) -> u64 {
    config.seed.unwrap_or(1)
}

fn upload(ctx: &egui::Context, name: &str, img: &RgbaImage) -> TextureHandle {
    let image = ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    );
    ctx.load_texture(name, image, egui::TextureOptions::LINEAR)
}

struct PlanetApp {
    config: PlanetConfig,
    theme: Theme,
    // slider is for n; width = 2^n, height = width / 2
    exp: u32,
    fixed_seed: bool,
    seed: u64,

    // in-flight pass, stepped once per frame
    builder: Option<TextureBuilder>,
    maps: Option<TextureSet>,

    // uploaded textures
    preview: Option<TextureHandle>,
    map_textures: Vec<(TextureKind, TextureHandle)>,
    companion: Option<(Theme, TextureHandle)>,
    stars: Vec<[f32; 3]>,

    // timing & status
    started: Option<Instant>,
    last_duration: Option<f32>,
    status_message: String,
}

impl PlanetApp {
    fn new(config: PlanetConfig, theme: Theme) -> Self {
        let exp = config.width.max(1).ilog2().clamp(7, 11);
        Self {
            fixed_seed: config.seed.is_some(),
            seed: config.seed.unwrap_or(2025),
            stars: star_field(STAR_COUNT, STAR_EXTENT, body_seed(&config)),
            config,
            theme,
            exp,
            builder: None,
            maps: None,
            preview: None,
            map_textures: Vec::new(),
            companion: None,
            started: None,
            last_duration: None,
            status_message: String::new(),
        }
    }

    fn start_generation(&mut self) {
        if let Some(mut previous) = self.builder.take() {
            previous.cancel();
        }
        self.config.width = 1 << self.exp;
        self.config.height = self.config.width / 2;
        self.config.seed = self.fixed_seed.then_some(self.seed);

        match TextureBuilder::new(&self.config) {
            Ok(builder) => {
                info!(
                    width = self.config.width,
                    height = self.config.height,
                    chunk_rows = self.config.chunk_rows,
                    "starting planet generation"
                );
                self.builder = Some(builder);
                self.started = Some(Instant::now());
                self.status_message = "Generating…".into();
                self.stars = star_field(STAR_COUNT, STAR_EXTENT, body_seed(&self.config));
                self.companion = None;
            }
            Err(e) => {
                error!("invalid planet config: {e}");
                self.status_message = format!("Config error: {e}");
            }
        }
    }

    fn cancel_generation(&mut self) {
        if let Some(builder) = self.builder.as_mut() {
            builder.cancel();
        }
    }

    // One tick of the in-flight pass per frame
    fn advance(&mut self, ctx: &egui::Context) {
        let Some(builder) = self.builder.as_mut() else {
            return;
        };
        match builder.step() {
            Step::More => ctx.request_repaint(),
            Step::Done => {
                let ticks = builder.ticks();
                let maps = builder.take_textures();
                self.builder = None;
                if let Some(maps) = maps {
                    self.install_maps(ctx, maps);
                }
                self.last_duration = self.started.map(|t| t.elapsed().as_secs_f32() * 1000.0);
                self.status_message = format!(
                    "Generated in {:.2} ms over {} ticks",
                    self.last_duration.unwrap_or_default(),
                    ticks
                );
            }
            Step::Cancelled => {
                self.builder = None;
                self.status_message = "Generation cancelled".into();
            }
        }
    }

    fn install_maps(&mut self, ctx: &egui::Context, maps: TextureSet) {
        self.map_textures = TextureKind::ALL
            .into_iter()
            .map(|kind| (kind, upload(ctx, kind.name(), maps.get(kind))))
            .collect();
        self.preview = Some(upload(ctx, "planet", &maps.composite(self.theme.cloud_opacity())));
        self.maps = Some(maps);
    }

    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if let Some(maps) = &self.maps {
            self.preview = Some(upload(ctx, "planet", &maps.composite(self.theme.cloud_opacity())));
        }
    }

    fn companion_texture(&mut self, ctx: &egui::Context) -> TextureHandle {
        if let Some((theme, tex)) = &self.companion {
            if *theme == self.theme {
                return tex.clone();
            }
        }
        let seed = body_seed(&self.config);
        let body = match self.theme.companion() {
            Companion::Sun => sun_texture(BODY_WIDTH, BODY_HEIGHT, seed),
            Companion::Moon => moon_texture(BODY_WIDTH, BODY_HEIGHT, seed),
        };
        let tex = upload(ctx, "companion", &body);
        self.companion = Some((self.theme, tex.clone()));
        tex
    }

    fn save_pngs(&mut self) {
        let Some(maps) = &self.maps else {
            self.status_message = "Nothing to save yet".into();
            return;
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        let result = save_textures(maps, &dir, "planet")
            .and_then(|_| save_config(&self.config, &dir, "planet"));
        self.status_message = match result {
            Ok(_) => format!("Saved to {}", dir.display()),
            Err(e) => {
                error!("export failed: {e}");
                format!("Save error: {e}")
            }
        };
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Planet Generator");
        ui.separator();

        let width = 1u32 << self.exp;
        ui.label("Resolution 2^n × 2^(n-1)");
        ui.add(
            egui::Slider::new(&mut self.exp, 7..=11)
                .text(format!("{}×{}", width, width / 2))
                .step_by(1.0),
        );

        ui.label("Octaves");
        ui.add(egui::Slider::new(&mut self.config.octaves, 1..=6));

        ui.label("Rows per tick");
        ui.add(egui::Slider::new(&mut self.config.chunk_rows, 1..=64));

        ui.label("Sphere scale");
        ui.add(egui::Slider::new(&mut self.config.scale, 0.5..=6.0));

        ui.label("Cloud threshold");
        ui.add(egui::Slider::new(&mut self.config.cloud_threshold, -0.5..=0.9));

        ui.checkbox(&mut self.fixed_seed, "Seeded lattice");
        if self.fixed_seed {
            ui.add(
                egui::DragValue::new(&mut self.seed)
                    .speed(1.0)
                    .range(0..=MAX_SEED),
            );
        }

        ui.separator();

        let label = match self.theme {
            Theme::Light => "Dark theme",
            Theme::Dark => "Light theme",
        };
        if ui.button(label).clicked() {
            self.theme = self.theme.toggled();
            self.refresh_preview(ui.ctx());
        }

        if let Some(builder) = &self.builder {
            ui.add(egui::ProgressBar::new(builder.progress()).show_percentage());
            if ui.button("Cancel").clicked() {
                self.cancel_generation();
                ui.ctx().request_repaint();
            }
        } else if ui.button("Generate Planet").clicked() {
            self.start_generation();
        }

        if ui.button("Save PNG…").clicked() {
            self.save_pngs();
        }

        ui.separator();
        ui.label(&self.status_message);
    }

    fn scene(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        if self.theme.shows_stars() {
            let painter = ui.painter();
            let scale = rect.width() / STAR_EXTENT;
            for star in &self.stars {
                let pos = rect.center() + Vec2::new(star[0], star[1]) * scale;
                if rect.contains(pos) {
                    painter.circle_filled(pos, 1.0, Color32::WHITE);
                }
            }
        }

        let Some(preview) = self.preview.as_ref().map(|tex| tex.id()) else {
            ui.centered_and_justified(|ui| {
                ui.label("Click “Generate Planet” to start");
            });
            return;
        };
        let companion = self.companion_texture(ui.ctx()).id();

        let available = ui.available_size();
        let planet_size = Vec2::new(available.x * 0.7, available.x * 0.35);
        ui.horizontal(|ui| {
            ui.image((preview, planet_size));
            ui.image((companion, Vec2::new(available.x * 0.25, available.x * 0.125)));
        });

        ui.separator();
        let thumb = Vec2::new(available.x * 0.22, available.x * 0.11);
        egui::Grid::new("maps").show(ui, |ui| {
            for (kind, _) in &self.map_textures {
                ui.label(kind.name());
            }
            ui.end_row();
            for (_, tex) in &self.map_textures {
                ui.image((tex.id(), thumb));
            }
            ui.end_row();
        });
    }
}

impl App for PlanetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(match self.theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        });

        self.advance(ctx);

        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.scene(ui));
    }
}

// Generate on a current-thread runtime, yielding between chunks, then export
fn run_headless(config: PlanetConfig, args: &Args, theme: Theme) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let builder = TextureBuilder::new(&config).context("invalid planet config")?;
    let start = Instant::now();
    let Some(maps) = rt.block_on(drive(builder)) else {
        bail!("planet generation was cancelled");
    };
    info!(
        elapsed_ms = start.elapsed().as_secs_f32() * 1000.0,
        "planet generated"
    );

    for path in save_textures(&maps, &args.out, &args.stem).context("failed to save maps")? {
        info!("wrote {}", path.display());
    }
    save_config(&config, &args.out, &args.stem).context("failed to save config")?;

    let preview = maps.composite(theme.cloud_opacity());
    preview
        .save(args.out.join(format!("{}_preview.png", args.stem)))
        .context("failed to save preview")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PlanetConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlanetConfig::default(),
    };
    let theme = if args.dark { Theme::Dark } else { Theme::Light };

    if args.headless {
        return run_headless(config, &args, theme);
    }

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };
    run_native(
        "Planet Texture Generator",
        opts,
        Box::new(move |_cc| Ok(Box::new(PlanetApp::new(config, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
