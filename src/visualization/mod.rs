pub mod rodsim_vis2d;
