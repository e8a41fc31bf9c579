mod controls;
mod fps;
mod panels;
mod view;
