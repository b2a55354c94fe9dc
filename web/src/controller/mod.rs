pub(crate) mod ai_controller;
pub(crate) mod health_check_controller;
pub(crate) mod notebook_controller;
pub(crate) mod page_controller;
pub(crate) mod task_controller;
pub(crate) mod user_controller;
pub(crate) mod user_session_controller;
