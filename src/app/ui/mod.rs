mod cloud;
mod controls;
mod details;
mod panels;
