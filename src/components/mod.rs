pub mod entanglement_view;
