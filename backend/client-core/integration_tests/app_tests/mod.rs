mod helpers;
mod lines;
mod navigation;
mod sections;
mod sign_in;
mod sign_out;
mod stations;
