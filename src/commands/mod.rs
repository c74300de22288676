pub mod crawl;

pub use crawl::crawl;
