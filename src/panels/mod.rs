mod toolbar;

pub use toolbar::toolbar;
