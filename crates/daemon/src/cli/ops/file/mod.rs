use clap::{Args, Subcommand};

pub mod cat;
pub mod create;
pub mod ls;
pub mod rm;
pub mod write;

use crate::cli::op::Op;

crate::command_enum! {
    (Create, create::Create),
    (Ls, ls::Ls),
    (Cat, cat::Cat),
    (Write, write::Write),
    (Rm, rm::Rm),
}

pub type FileCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct File {
    #[command(subcommand)]
    pub command: FileCommand,
}

#[async_trait::async_trait]
impl Op for File {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
