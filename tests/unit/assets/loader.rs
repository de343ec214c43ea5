use super::*;

struct NoTextures;

impl ResourceLoader for NoTextures {
    fn load_texture(&self, path: &Path) -> TableauResult<Texture> {
        Err(TableauError::resource(format!("{}", path.display())))
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "tableau-loader-{tag}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn image_loader_reads_dimensions() {
    let dir = temp_dir("png");
    let path = dir.join("dot.png");
    image::RgbaImage::new(7, 3).save(&path).unwrap();

    let texture = ImageLoader.load_texture(&path).unwrap();
    assert_eq!((texture.width(), texture.height()), (7, 3));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn image_loader_reports_missing_files() {
    let err = ImageLoader
        .load_texture(Path::new("/definitely/not/here.png"))
        .unwrap_err();
    assert!(matches!(err, TableauError::Resource(_)));
}

#[test]
fn default_font_loading_checks_files_exist() {
    let dir = temp_dir("fonts");
    let font = dir.join("a.ttf");
    std::fs::write(&font, b"not really a font").unwrap();

    let fonts = NoTextures.load_fonts(std::slice::from_ref(&font)).unwrap();
    assert_eq!(fonts.files(), &[font]);
    assert!(NoTextures.load_fonts(&[dir.join("b.ttf")]).is_err());
    assert!(NoTextures.load_fonts(&[]).is_err());

    let _ = std::fs::remove_dir_all(dir);
}
