mod runner;

pub use runner::{CommandOutput, CommandRunner, Invocation, TokioCommandRunner};

#[cfg(test)]
pub use runner::MockCommandRunner;
