pub mod types;
pub mod locus;
pub mod solver;
pub mod measurement;

#[cfg(test)]
mod tests_solver;
