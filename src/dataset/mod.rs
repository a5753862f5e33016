mod loader;
mod options;
#[cfg(test)]
mod tests;

pub use loader::Dataset;
pub use options::FilterOptions;
