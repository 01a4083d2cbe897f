pub mod doca_routes;
pub mod kanban_routes;
pub mod veiculo_routes;
