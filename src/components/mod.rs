pub mod organic_cluster;
