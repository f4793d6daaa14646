mod line_builder;
