pub mod roles_seeder;
