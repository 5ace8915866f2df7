mod edit_response;
mod experiences;
mod get_portfolio;
mod projects;
mod save_portfolio;
mod sections;
mod update_profile;

pub use experiences::{
    __path_add_experience_handler, __path_remove_experience_handler,
    __path_update_experience_handler, add_experience_handler, remove_experience_handler,
    update_experience_handler,
};
pub use get_portfolio::{__path_get_portfolio_handler, get_portfolio_handler};
pub use projects::{
    __path_add_project_handler, __path_remove_project_handler, __path_update_project_handler,
    add_project_handler, remove_project_handler, update_project_handler,
};
pub use save_portfolio::{__path_save_portfolio_handler, save_portfolio_handler};
pub use sections::{
    __path_add_section_handler, __path_remove_section_handler, __path_update_section_handler,
    add_section_handler, remove_section_handler, update_section_handler, AddSectionRequest,
};
pub use update_profile::{__path_update_profile_handler, update_profile_handler};
