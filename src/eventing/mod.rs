pub mod model_event;
