//! Controllers da aplicação
//!
//! Fazem a ponte entre as rotas e os repositórios/serviços de domínio.

pub mod kanban_controller;
pub mod veiculo_controller;
