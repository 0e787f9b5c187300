pub mod form_view;

pub use form_view::FormView;
