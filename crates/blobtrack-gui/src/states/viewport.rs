/// State of one image surface: its texture plus zoom and pan.
pub struct ViewportState {
    /// Texture name, unique per surface.
    name: &'static str,
    pub texture: Option<egui::TextureHandle>,
    pub image_size: Option<[usize; 2]>,
    pub zoom: f32,
    pub pan_offset: egui::Vec2,
    /// Zoom follows the surface size until the user zooms by hand.
    pub fit: bool,
    pub viewing_label: String,
}

impl ViewportState {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            texture: None,
            image_size: None,
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            fit: true,
            viewing_label: String::new(),
        }
    }

    /// Upload a new image, reusing the texture when there is one.
    pub fn set_image(&mut self, ctx: &egui::Context, image: egui::ColorImage, label: String) {
        self.image_size = Some(image.size);
        match self.texture {
            Some(ref mut texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture(self.name, image, egui::TextureOptions::NEAREST));
            }
        }
        self.viewing_label = label;
    }
}
