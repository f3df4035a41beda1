/// Unit test target covering the public analytics surface
mod analytics_tests;
