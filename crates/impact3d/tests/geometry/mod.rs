mod contact_reduction;
mod mesh_intersection;
mod point_triangle_toi;
