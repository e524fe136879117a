mod initdb;
