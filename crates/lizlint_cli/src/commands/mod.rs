pub mod init;
pub mod lsp;
pub mod scan;
