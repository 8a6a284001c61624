pub mod homepage;
pub mod post_renderer;
pub mod sitemap_renderer;
