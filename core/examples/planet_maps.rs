use std::path::Path;

use planet_core::bodies::{moon_texture, sun_texture};
use planet_core::export::save_textures;
use planet_core::{PlanetConfig, Step, TextureBuilder, Theme};

fn main() {
    let config = PlanetConfig::default();
    let mut builder = TextureBuilder::new(&config).unwrap();

    // Tick by tick, the way a render loop would
    while builder.step() == Step::More {
        println!("{:>5.1}%", builder.progress() * 100.0);
    }
    let maps = builder.take_textures().unwrap();
    println!("Finished in {} ticks", builder.ticks());

    let out = Path::new("planet_out");
    for path in save_textures(&maps, out, "planet").unwrap() {
        println!("Saved {}", path.display());
    }

    for theme in [Theme::Light, Theme::Dark] {
        let preview = maps.composite(theme.cloud_opacity());
        let name = format!("planet_{:?}.png", theme).to_lowercase();
        preview.save(out.join(name)).unwrap();
    }
    moon_texture(256, 128, 1).save(out.join("moon.png")).unwrap();
    sun_texture(256, 128, 1).save(out.join("sun.png")).unwrap();
}
